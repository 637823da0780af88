//! Shared value types for the resolution domain.
//!
//! Unlike the newtypes in [`crate::identifiers`], these types describe how a
//! request is shaped (method, body encoding, wire parameters) and the ambient
//! state a call reads (configuration keys, connection snapshot).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Address, ChainId};

// ---------------------------------------------------------------------------
// Request shape
// ---------------------------------------------------------------------------

/// HTTP method an endpoint is declared with.
///
/// Only affects direct API calls and body classification. The proxy route is
/// always a POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Query-string only request.
    #[default]
    Get,
    /// Request with a JSON body.
    Post,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

// ---------------------------------------------------------------------------

/// How body parameters are combined into the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyMode {
    /// Every body parameter becomes a top-level key of a JSON object.
    #[default]
    Property,
    /// The body is the raw value of the (last) body parameter, unwrapped.
    ///
    /// Used by endpoints whose payload is an array or primitive rather than
    /// a record of named fields.
    Replace,
}

// ---------------------------------------------------------------------------
// Wire parameters
// ---------------------------------------------------------------------------

/// Endpoint parameters after parsing, keyed by wire name.
///
/// Backed by `serde_json`'s insertion-ordered map, so classification output
/// follows the order in which the endpoint's API params declare their fields.
pub type WireParams = Map<String, Value>;

/// Returns `true` if a wire value counts as present.
///
/// `null`, `false`, `0`, `NaN` and `""` are absent; every array and object
/// (including empty ones) is present.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ---------------------------------------------------------------------------
// Ambient state
// ---------------------------------------------------------------------------

/// Keys readable through [`crate::ConfigProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Credential for direct API calls.
    ApiKey,
    /// Proxy server base URL, used when no API key is configured.
    ServerUrl,
}

impl ConfigKey {
    /// Returns the conventional configuration name of this key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ApiKey => "apiKey",
            Self::ServerUrl => "serverUrl",
        }
    }
}

// ---------------------------------------------------------------------------

/// Snapshot of the wallet connection at the time of a call.
///
/// The resolver reads it once per call and never changes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionContext {
    /// No wallet is connected.
    #[default]
    Disconnected,
    /// A wallet is connected on `chain` with the active `account`.
    Connected {
        /// Chain the wallet is connected to.
        chain: ChainId,
        /// Currently selected account.
        account: Address,
    },
}

impl ConnectionContext {
    /// Creates a connected snapshot.
    pub fn connected(chain: ChainId, account: Address) -> Self {
        Self::Connected { chain, account }
    }

    /// Returns `true` if a wallet is connected.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }
}
