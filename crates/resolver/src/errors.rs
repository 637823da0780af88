//! Error types for the EVM API resolution domain.
//!
//! [`ResolverError`] covers every way a single resolver call can fail. The
//! categories are deliberately coarse:
//!
//! - **Configuration**: raised before any network call (missing server URL on
//!   the proxy route, missing address while no wallet is connected).
//! - **Invalid parameters**: an endpoint parser rejected caller input.
//! - **Transport**: whatever the [`crate::HttpTransport`] implementation
//!   returned, carried through unchanged.
//! - **Decode**: the response body did not match the endpoint's raw result shape.
//!
//! [`TransportError`] lives here rather than in the `transport` crate so that
//! the port trait can name it without pulling an HTTP client into the domain.

use thiserror::Error;

/// Message used when the proxy route is selected but no server URL is configured.
pub const MISSING_SERVER_URL: &str = "EvmApi failed: start with apiKey or serverUrl";

/// Message used when an address-bearing endpoint is called without an address
/// while no wallet is connected.
pub const MISSING_ADDRESS: &str = "EvmApi failed: address is required";

// ---------------------------------------------------------------------------
// Resolver errors
// ---------------------------------------------------------------------------

/// Errors produced by [`crate::Resolver::fetch`].
///
/// Configuration and parameter errors are raised synchronously before the
/// request leaves the process. Transport errors are never retried or
/// reclassified.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// Required configuration is missing for the selected route.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Fixed, human-readable description of the missing configuration.
        message: String,
    },

    /// An endpoint parameter parser rejected the supplied logical parameters.
    #[error("Invalid parameters: {message}")]
    InvalidParams {
        /// Description of the rejected value.
        message: String,
    },

    /// The HTTP transport failed; the error is passed through as-is.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be decoded into the endpoint's raw result type.
    #[error("Failed to decode '{operation}' response: {source}")]
    Decode {
        /// Operation name of the endpoint whose response failed to decode.
        operation: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl ResolverError {
    /// Creates a [`ResolverError::Configuration`] with the given message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a [`ResolverError::InvalidParams`] with the given message.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Returns `true` if the error was raised before any network activity.
    pub fn is_pre_flight(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::InvalidParams { .. }
        )
    }
}

impl From<ParseError> for ResolverError {
    fn from(err: ParseError) -> Self {
        Self::invalid_params(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// Errors returned by [`crate::HttpTransport`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be sent or no response was received
    /// (connection refused, DNS failure, TLS error, timeout).
    #[error("Request failed: {message}")]
    Request {
        /// Description of the underlying failure.
        message: String,
    },

    /// The server answered with a non-success status code.
    #[error("Server error {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, which may contain error details.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("Response decode error: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Value parsing errors
// ---------------------------------------------------------------------------

/// Errors produced when normalising chain identifiers and addresses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The chain identifier is neither a decimal nor a `0x`-prefixed hex integer.
    #[error("Invalid chain id '{0}'")]
    InvalidChainId(String),

    /// The address is not `0x` followed by 40 hexadecimal digits.
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),
}
