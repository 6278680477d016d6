//! Outbound request execution.

use std::time::Duration;

use axum::{
    body::{Body, HttpBody},
    http::{header, HeaderMap, Method},
    response::Response,
};
use reqwest::redirect::Policy;
use url::Url;

use crate::config::ForwardConfig;
use crate::error::GatewayError;
use crate::http::response::{relay, strip_hop_by_hop};

/// Executes rewritten requests against upstream targets.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    /// Build the shared outbound client.
    pub fn new(config: &ForwardConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .redirect(Policy::limited(config.max_redirects))
            .no_proxy();

        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Send `method destination` with the caller's headers and body, and
    /// relay whatever the upstream answers.
    pub async fn forward(
        &self,
        destination: Url,
        method: Method,
        mut headers: HeaderMap,
        body: Body,
    ) -> Result<Response, GatewayError> {
        strip_hop_by_hop(&mut headers);
        headers.remove(header::HOST);

        let mut outbound = self.client.request(method, destination).headers(headers);

        // A streamed empty body would still go out chunked.
        if body.size_hint().exact() != Some(0) {
            outbound = outbound.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        let upstream = outbound.send().await.map_err(GatewayError::ForwardFailure)?;

        tracing::debug!(
            url = %upstream.url(),
            status = %upstream.status(),
            "Upstream responded"
        );

        Ok(relay(upstream))
    }
}
