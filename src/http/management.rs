//! Management interface served on the root path.
//!
//! # Operations
//! - `/` without `key`: usage text
//! - `/?key=K&value=V` (any method): write `K → V`
//! - `POST /?key=K` with a text body: write `K → body`
//! - `/?key=K` otherwise: read `K`
//!
//! An empty `key` or `value` parameter counts as absent.

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request},
    response::Response,
};

use crate::config::ManagementConfig;
use crate::error::GatewayError;
use crate::http::response::text;
use crate::routing::QueryParams;
use crate::store::{self, RouteStore};

/// Help text returned when no key is given.
pub const USAGE: &str = "Usage:\n\
1. Proxy: https://<gateway_url>/<key>/<rest_of_path>\n\
2. Get KV: GET https://<gateway_url>/?key=<key>\n\
3. Set KV: GET https://<gateway_url>/?key=<key>&value=<target_url>\n\
4. Set KV: POST https://<gateway_url>/?key=<key> (body contains target_url)";

/// Returns true when `path` addresses the management interface.
pub fn is_management_path(path: &str) -> bool {
    path.is_empty() || path == "/"
}

/// Handle a root-path request against `store`.
pub async fn handle(
    store: &dyn RouteStore,
    config: &ManagementConfig,
    request: Request<Body>,
) -> Result<Response, GatewayError> {
    let params = QueryParams::parse(request.uri().query());

    let Some(key) = params.first_non_empty("key") else {
        return Ok(text(USAGE));
    };

    if let Some(value) = params.first_non_empty("value") {
        store::register(store, key, value).await?;
        return Ok(text(format!("Successfully set key \"{key}\" to \"{value}\"")));
    }

    if request.method() == Method::POST {
        let bytes = to_bytes(request.into_body(), config.max_body_size)
            .await
            .map_err(|e| GatewayError::BodyRead(e.to_string()))?;
        let value = String::from_utf8_lossy(&bytes);
        if value.is_empty() {
            return Err(GatewayError::MissingBody);
        }

        store::register(store, key, &value).await?;
        return Ok(text(format!("Successfully set key \"{key}\" to \"{value}\"")));
    }

    match store::lookup(store, key).await? {
        Some(target) if !target.is_empty() => Ok(text(target)),
        _ => Err(GatewayError::KeyNotFound(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn request(method: Method, uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_management_path() {
        assert!(is_management_path("/"));
        assert!(is_management_path(""));
        assert!(!is_management_path("/k"));
    }

    #[tokio::test]
    async fn test_usage_without_key() {
        let store = MemoryStore::new();
        let config = ManagementConfig::default();

        let response = handle(&store, &config, request(Method::GET, "/", "")).await.unwrap();
        assert!(body_text(response).await.starts_with("Usage:"));

        let response = handle(&store, &config, request(Method::GET, "/?key=", "")).await.unwrap();
        assert!(body_text(response).await.starts_with("Usage:"));
    }

    #[tokio::test]
    async fn test_write_via_query_then_read() {
        let store = MemoryStore::new();
        let config = ManagementConfig::default();

        let uri = "/?key=docs&value=https%3A%2F%2Fexample.com%2Fdocs%2F";
        let response = handle(&store, &config, request(Method::GET, uri, "")).await.unwrap();
        assert_eq!(
            body_text(response).await,
            "Successfully set key \"docs\" to \"https://example.com/docs/\""
        );

        let response = handle(&store, &config, request(Method::GET, "/?key=docs", ""))
            .await
            .unwrap();
        assert_eq!(body_text(response).await, "https://example.com/docs/");
    }

    #[tokio::test]
    async fn test_write_via_post_body() {
        let store = MemoryStore::new();
        let config = ManagementConfig::default();

        let response = handle(
            &store,
            &config,
            request(Method::POST, "/?key=api", "https://api.example.com"),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            store.get("api").await.unwrap().as_deref(),
            Some("https://api.example.com")
        );
    }

    #[tokio::test]
    async fn test_empty_post_body_leaves_store_untouched() {
        let store = MemoryStore::with_routes([("api", "https://old.example")]);
        let config = ManagementConfig::default();

        let err = handle(&store, &config, request(Method::POST, "/?key=api", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::MissingBody));
        assert_eq!(store.get("api").await.unwrap().as_deref(), Some("https://old.example"));
    }

    #[tokio::test]
    async fn test_oversized_post_body() {
        let store = MemoryStore::new();
        let config = ManagementConfig { max_body_size: 4 };

        let err = handle(&store, &config, request(Method::POST, "/?key=k", "https://x"))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::BodyRead(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_read_missing_key() {
        let store = MemoryStore::new();
        let config = ManagementConfig::default();

        let err = handle(&store, &config, request(Method::GET, "/?key=nope", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::KeyNotFound(ref k) if k == "nope"));
    }

    #[tokio::test]
    async fn test_query_value_wins_over_post_body() {
        let store = MemoryStore::new();
        let config = ManagementConfig::default();

        handle(
            &store,
            &config,
            request(Method::POST, "/?key=k&value=https%3A%2F%2Fquery.example", "https://body.example"),
        )
        .await
        .unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("https://query.example"));
    }
}
