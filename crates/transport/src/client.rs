//! `reqwest`-backed [`HttpTransport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use resolver::{HttpRequest, HttpTransport, TransportError};
use serde_json::Value;
use tracing::debug;

use crate::query::query_pairs;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("evm-api-resolver/", env!("CARGO_PKG_VERSION"));

/// Sends resolver requests with a shared [`reqwest::Client`].
///
/// Performs exactly one attempt per request. Non-success statuses become
/// [`TransportError::Status`] with the response body attached.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the default 30 second timeout.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport whose requests fail after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(request_error)?;
        Ok(Self { client })
    }

    /// Wraps an existing client (shared connection pool, custom TLS, ...).
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    fn prepare(&self, builder: RequestBuilder, request: &HttpRequest) -> RequestBuilder {
        let mut builder = builder.query(&query_pairs(&request.query));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Value, TransportError> {
        let response = builder.send().await.map_err(request_error)?;
        let status = response.status();
        let body = response.text().await.map_err(request_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "Received response");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::Decode {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: HttpRequest) -> Result<Value, TransportError> {
        let builder = self.prepare(self.client.get(&request.url), &request);
        self.send(builder).await
    }

    async fn post(&self, request: HttpRequest) -> Result<Value, TransportError> {
        let mut builder = self.prepare(self.client.post(&request.url), &request);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        self.send(builder).await
    }
}

fn request_error(err: reqwest::Error) -> TransportError {
    TransportError::Request {
        message: err.to_string(),
    }
}
