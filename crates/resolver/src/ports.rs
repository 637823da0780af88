//! Port traits the resolver depends on.
//!
//! The resolver never performs I/O itself. It reads configuration and wallet
//! connection state through [`ConfigProvider`] and [`ConnectionProvider`], and
//! sends requests through [`HttpTransport`]. Infrastructure crates supply the
//! concrete implementations; tests supply in-memory ones.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::{ConfigKey, ConnectionContext, TransportError, WireParams};

// ---------------------------------------------------------------------------
// HTTP transport
// ---------------------------------------------------------------------------

/// A fully resolved outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Absolute request URL without query string.
    pub url: String,
    /// Query-string parameters, in insertion order.
    pub query: WireParams,
    /// JSON body. `None` for GET requests.
    pub body: Option<Value>,
    /// Extra headers as `(name, value)` pairs.
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Returns the value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Performs HTTP requests and returns the decoded JSON response body.
///
/// Implementations own connection handling, TLS and timeouts. They must not
/// retry on behalf of the resolver.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends a GET request with `request.query` as the query string.
    async fn get(&self, request: HttpRequest) -> Result<Value, TransportError>;

    /// Sends a POST request with `request.query` as the query string and
    /// `request.body` as the JSON body.
    async fn post(&self, request: HttpRequest) -> Result<Value, TransportError>;
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Read-only access to ambient configuration.
pub trait ConfigProvider: Send + Sync {
    /// Returns the configured value for `key`, or `None` when unset.
    fn get(&self, key: ConfigKey) -> Option<String>;
}

/// In-memory [`ConfigProvider`].
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: HashMap<ConfigKey, String>,
}

impl StaticConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning the updated configuration.
    #[must_use]
    pub fn with(mut self, key: ConfigKey, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }
}

impl ConfigProvider for StaticConfig {
    fn get(&self, key: ConfigKey) -> Option<String> {
        self.values.get(&key).cloned()
    }
}

// ---------------------------------------------------------------------------
// Connection state
// ---------------------------------------------------------------------------

/// Read-only access to the current wallet connection.
pub trait ConnectionProvider: Send + Sync {
    /// Returns a snapshot of the connection as of now.
    fn connection(&self) -> ConnectionContext;
}

impl ConnectionProvider for ConnectionContext {
    fn connection(&self) -> ConnectionContext {
        self.clone()
    }
}
