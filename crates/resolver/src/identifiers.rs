//! Newtype domain identifiers.
//!
//! Every value with a canonical wire form is represented as a distinct newtype.
//! Construction normalises the input once; the accessors return the form the
//! EVM API expects, so callers never format chain ids or addresses by hand.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ParseError;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self> (empty is absent), as_str().
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new value, returning `None` if it is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Configuration values
// ---------------------------------------------------------------------------

string_id! {
    /// Credential sent in the `x-api-key` header on direct API calls.
    ///
    /// `Debug` is redacted and there is no `Display`, so the key never ends up in logs.
    ApiKey
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

string_id! {
    /// Base URL of the proxy server used when no API key is configured.
    ServerUrl
}

impl ServerUrl {
    /// Returns the proxy endpoint for a named operation:
    /// `{server}/functions/{operation}`.
    pub fn function_url(&self, operation: &str) -> String {
        format!("{}/functions/{}", self.0.trim_end_matches('/'), operation)
    }
}

impl std::fmt::Debug for ServerUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ServerUrl").field(&self.0).finish()
    }
}

impl std::fmt::Display for ServerUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Call correlation
// ---------------------------------------------------------------------------

/// Identifies a single resolver call.
///
/// Generated fresh for every [`crate::Resolver::fetch`] and recorded on its
/// tracing span so all events from one call can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(Uuid);

impl CallId {
    /// Generates a new random call identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Chain identifiers
// ---------------------------------------------------------------------------

/// An EVM chain identifier (EIP-155).
///
/// Accepts decimal (`"1"`, `"137"`) or `0x`-prefixed hex (`"0x1"`, `"0x89"`)
/// input. The API expects the hex form returned by [`ChainId::api_hex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainId(u64);

impl ChainId {
    /// Ethereum mainnet.
    pub const ETHEREUM: Self = Self(1);
    /// Polygon PoS.
    pub const POLYGON: Self = Self(137);
    /// BNB Smart Chain.
    pub const BSC: Self = Self(56);

    /// Creates a [`ChainId`] from a raw integer.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the `0x`-prefixed lowercase hex form used on the wire.
    pub fn api_hex(self) -> String {
        format!("{:#x}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => trimmed.parse::<u64>(),
        };
        parsed
            .map(Self)
            .map_err(|_| ParseError::InvalidChainId(s.to_string()))
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// A 20-byte EVM account or contract address.
///
/// Input is case-insensitive (checksummed, upper- or lowercase). The original
/// spelling is kept for display; [`Address::lowercase`] gives the wire form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    const HEX_LEN: usize = 40;

    /// Returns the lowercase `0x`-prefixed form used on the wire.
    pub fn lowercase(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Returns the address exactly as it was supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidAddress(s.to_string());
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(invalid)?;
        if digits.len() != Self::HEX_LEN || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        Ok(Self(format!("0x{digits}")))
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
