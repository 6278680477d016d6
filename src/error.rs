//! Request-level error classification.
//!
//! Every failure on the management or proxy path is turned into a
//! `GatewayError` and rendered as an immediate plain-text response. Errors
//! never outlive the request that produced them and nothing is retried.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;

/// Errors produced while handling a single gateway request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request path has an empty first segment.
    #[error("Invalid path structure")]
    MissingKey,

    /// A POST write carried no body.
    #[error("Missing body for POST request")]
    MissingBody,

    /// The management body could not be read (or exceeded the size limit).
    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    /// A management read named a key with no registered target.
    #[error("Key \"{0}\" not found")]
    KeyNotFound(String),

    /// A proxied request named a key with no registered target.
    #[error("Proxy target for key \"{0}\" not found")]
    ProxyTargetNotFound(String),

    /// `target + suffix` is not an absolute URL.
    #[error("Error constructing proxy request: invalid URL \"{url}\": {source}")]
    UrlConstruction {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The route store failed (as opposed to a plain miss).
    #[error("Route store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// The outbound request failed before an upstream response arrived.
    #[error("Error forwarding proxy request: {0}")]
    ForwardFailure(#[source] reqwest::Error),
}

impl GatewayError {
    /// HTTP status this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingKey | GatewayError::MissingBody | GatewayError::BodyRead(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::KeyNotFound(_) | GatewayError::ProxyTargetNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            GatewayError::UrlConstruction { .. }
            | GatewayError::StoreUnavailable(_)
            | GatewayError::ForwardFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short, stable label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::MissingKey => "missing_key",
            GatewayError::MissingBody => "missing_body",
            GatewayError::BodyRead(_) => "body_read",
            GatewayError::KeyNotFound(_) => "key_not_found",
            GatewayError::ProxyTargetNotFound(_) => "proxy_target_not_found",
            GatewayError::UrlConstruction { .. } => "url_construction",
            GatewayError::StoreUnavailable(_) => "store_unavailable",
            GatewayError::ForwardFailure(_) => "forward_failure",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(GatewayError::MissingKey.status(), StatusCode::BAD_REQUEST);
        assert_eq!(GatewayError::MissingBody.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GatewayError::KeyNotFound("k".into()).status(),
            StatusCode::NOT_FOUND
        );

        let err = GatewayError::UrlConstruction {
            url: "not-a-url/".into(),
            source: url::ParseError::RelativeUrlWithoutBase,
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind(), "url_construction");
    }

    #[test]
    fn test_not_found_messages_per_branch() {
        let read = GatewayError::KeyNotFound("docs".into());
        assert_eq!(read.to_string(), "Key \"docs\" not found");
        assert_eq!(read.kind(), "key_not_found");

        let proxy = GatewayError::ProxyTargetNotFound("unregisteredKey".into());
        assert_eq!(
            proxy.to_string(),
            "Proxy target for key \"unregisteredKey\" not found"
        );
        assert_eq!(proxy.status(), StatusCode::NOT_FOUND);
        assert_eq!(proxy.kind(), "proxy_target_not_found");
    }

    #[test]
    fn test_store_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err: GatewayError = StoreError::from(io).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind(), "store_unavailable");
    }
}
