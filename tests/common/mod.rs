//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    extract::Path,
    http::{Request, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use keyed_gateway::config::GatewayConfig;
use keyed_gateway::store::{RouteStore, StoreError};
use keyed_gateway::{HttpServer, Shutdown};
use serde_json::json;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

/// Start a backend that answers every request with a JSON description of it.
///
/// `/redirect` answers 302 → `/final`; `/status/{code}` answers that status.
pub async fn start_echo_backend() -> SocketAddr {
    let app = Router::new()
        .route("/redirect", get(|| async { Redirect::to("/final") }))
        .route("/status/{code}", get(status_handler))
        .fallback(echo_handler);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn echo_handler(request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();

    let headers: serde_json::Map<String, serde_json::Value> = parts
        .headers
        .iter()
        .map(|(k, v)| (k.to_string(), json!(v.to_str().unwrap_or_default())))
        .collect();

    let uri = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();

    (
        [("x-upstream", "echo")],
        Json(json!({
            "method": parts.method.as_str(),
            "uri": uri,
            "headers": headers,
            "body": String::from_utf8_lossy(&body),
        })),
    )
        .into_response()
}

async fn status_handler(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [("x-upstream", "status")], format!("upstream {}", code)).into_response()
}

/// Start a programmable raw-TCP backend with async support.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let f = f.clone();
            tokio::spawn(async move {
                let (status, body) = f().await;
                let reason = StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown");

                let response_str = format!(
                    "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response_str.as_bytes()).await;
                let _ = socket.shutdown().await;
                tokio::time::sleep(Duration::from_millis(10)).await;
            });
        }
    });
    addr
}

/// Start a gateway over `store` on an ephemeral port.
#[allow(dead_code)]
pub async fn start_gateway(store: Arc<dyn RouteStore>) -> (SocketAddr, Shutdown) {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();

    let server = HttpServer::new(config, store).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Client that talks to the gateway directly and never follows redirects itself.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

/// Store whose every call fails, as an unreachable backend would.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl RouteStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(std::io::Error::new(std::io::ErrorKind::TimedOut, "store timed out").into())
    }

    async fn put(&self, _key: &str, _target: &str) -> Result<(), StoreError> {
        Err(std::io::Error::new(std::io::ErrorKind::TimedOut, "store timed out").into())
    }
}
