//! HTTP transport to the CAS server.
//!
//! One validation attempt issues exactly one request; the full response
//! body is accumulated before parsing starts, and the bytes are decoded
//! as UTF-8 regardless of the declared content type (validation bodies
//! are small control documents, not streamed payloads). Connection-level
//! failures surface as [`TransportError`] and are never retried here:
//! the ticket is single-use, so a retry could not succeed anyway.
//! Timeouts and socket reuse belong to the underlying HTTP client.

use async_trait::async_trait;
use cas_protocol::request::{Method, ValidationRequest};
use thiserror::Error;

/// Connection-level failure while calling the CAS server.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP call failed (DNS, TCP, TLS, or protocol trouble).
    #[error("CAS server unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure reported by a non-HTTP transport implementation.
    #[error("CAS server unreachable: {0}")]
    Connection(String),
}

/// Executes one validation request and returns the accumulated body.
#[async_trait]
pub trait ValidationTransport: Send + Sync {
    /// Performs the HTTP call described by `request`.
    async fn execute(&self, request: &ValidationRequest) -> Result<String, TransportError>;
}

/// The default transport, backed by a shared `reqwest` client.
///
/// Plain or TLS transport follows the request URL's scheme, which the
/// configuration fixed at construction time.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with a default client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport over a caller-configured client, e.g. to set
    /// connect/read timeouts.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ValidationTransport for HttpTransport {
    async fn execute(&self, request: &ValidationRequest) -> Result<String, TransportError> {
        let builder = match request.method {
            Method::Get => self.client.get(request.url.clone()),
            Method::Post => self
                .client
                .post(request.url.clone())
                .header(reqwest::header::CONTENT_TYPE, "text/xml")
                .body(request.body.clone().unwrap_or_default()),
        };

        let response = builder.send().await?;
        let bytes = response.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
