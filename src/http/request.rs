//! Request identification.
//!
//! # Responsibilities
//! - Reuse the caller's `x-request-id` when it is valid, otherwise mint a UUID v4
//! - Expose the ID to handlers through request extensions
//! - Echo the ID on the response
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The header stays on the request, so it is also sent upstream

use std::task::{Context, Poll};

use axum::http::{HeaderName, HeaderValue, Request, Response};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// The ID assigned to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Access to the request ID stored by [`RequestIdLayer`].
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&RequestId>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&RequestId> {
        self.extensions().get::<RequestId>()
    }
}

/// Layer that assigns request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Service produced by [`RequestIdLayer`].
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestIdService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    S::Error: 'static,
    ResBody: 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        let (id, value) = match request.headers().get(&X_REQUEST_ID) {
            Some(value) if value.to_str().is_ok_and(|v| !v.is_empty()) => {
                (value.to_str().unwrap_or_default().to_string(), value.clone())
            }
            _ => {
                let id = Uuid::new_v4().to_string();
                // A hyphenated UUID is always a valid header value.
                let value = HeaderValue::from_str(&id).unwrap_or(HeaderValue::from_static("unknown"));
                (id, value)
            }
        };

        request.headers_mut().insert(X_REQUEST_ID, value.clone());
        request.extensions_mut().insert(RequestId(id));

        let future = self.inner.call(request);
        Box::pin(async move {
            let mut response = future.await?;
            response.headers_mut().entry(X_REQUEST_ID).or_insert(value);
            Ok(response)
        })
    }
}
