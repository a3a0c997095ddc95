//! HTTP transport seam.
//!
//! The client hands a fully signed `http::Request` to a [`Transport`] and
//! expects the complete response back. Connection and read timeouts are the
//! transport's business, as is any retry on connection faults: the client
//! itself never retries a failed round trip.

use crate::error::BoxError;

use async_trait::async_trait;
use bytes::Bytes;

/// Issues one HTTP round trip.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the full response, whatever its status.
    ///
    /// Errors are reserved for failures to complete the exchange at all.
    async fn send(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>, BoxError>;
}

/// [`Transport`] backed by a `reqwest` client.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[cfg(feature = "reqwest")]
impl ReqwestTransport {
    /// Wraps a configured `reqwest` client, e.g. one with timeouts set.
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "reqwest")]
#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>, BoxError> {
        let (parts, body) = request.into_parts();
        let response = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .body(body)
            .send()
            .await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        let mut builder = http::Response::builder().status(status);
        if let Some(response_headers) = builder.headers_mut() {
            *response_headers = headers;
        }
        Ok(builder.body(body)?)
    }
}
