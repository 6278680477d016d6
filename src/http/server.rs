//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the single gateway handler
//! - Wire up middleware (tracing, optional timeout, request ID)
//! - Dispatch root-path requests to the management interface
//! - Resolve, rewrite and forward every other request
//! - Render classified errors as plain-text responses

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{GatewayConfig, ManagementConfig};
use crate::error::GatewayError;
use crate::http::management;
use crate::http::request::{RequestIdExt, RequestIdLayer};
use crate::observability::metrics;
use crate::routing::{parse_path, rewrite, QueryParams};
use crate::store::{self, RouteStore};
use crate::upstream::Forwarder;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RouteStore>,
    pub forwarder: Forwarder,
    pub management: ManagementConfig,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over `store`.
    pub fn new(config: GatewayConfig, store: Arc<dyn RouteStore>) -> Result<Self, reqwest::Error> {
        let forwarder = Forwarder::new(&config.forward)?;

        let state = AppState {
            store,
            forwarder,
            management: config.management.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/", any(gateway_handler))
            .fallback(gateway_handler)
            .with_state(state);

        if let Some(secs) = config.timeouts.request_secs {
            router = router.layer(TimeoutLayer::new(Duration::from_secs(secs)));
        }

        router
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point for every request.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .request_id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let branch = if management::is_management_path(&path) {
        metrics::BRANCH_MANAGEMENT
    } else {
        metrics::BRANCH_PROXY
    };

    let result = if branch == metrics::BRANCH_MANAGEMENT {
        management::handle(state.store.as_ref(), &state.management, request).await
    } else {
        proxy(&state, request).await
    };

    let response = match result {
        Ok(response) => response,
        Err(err) => {
            let status = err.status();
            if status.is_server_error() {
                tracing::error!(request_id = %request_id, method = %method, path = %path, kind = err.kind(), error = %err, "Request failed");
            } else {
                tracing::warn!(request_id = %request_id, method = %method, path = %path, kind = err.kind(), error = %err, "Request rejected");
            }
            metrics::record_error(err.kind());
            err.into_response()
        }
    };

    metrics::record_request(&method, response.status().as_u16(), branch, start_time);
    response
}

/// Resolve the route key, rewrite the URL and forward the request.
async fn proxy(state: &AppState, request: Request<Body>) -> Result<Response, GatewayError> {
    let (parts, body) = request.into_parts();

    let parsed = parse_path(parts.uri.path())?;
    let target = store::lookup(state.store.as_ref(), parsed.key)
        .await?
        .filter(|target| !target.is_empty())
        .ok_or_else(|| GatewayError::ProxyTargetNotFound(parsed.key.to_string()))?;

    let query = QueryParams::parse(parts.uri.query());
    let destination = rewrite(&target, &parsed.suffix, &query)?;

    tracing::debug!(
        key = %parsed.key,
        destination = %destination,
        method = %parts.method,
        "Forwarding request"
    );

    state
        .forwarder
        .forward(destination, parts.method, parts.headers, body)
        .await
}
