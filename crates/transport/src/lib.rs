//! EVM API HTTP transport adapter.
//!
//! Implements the [`resolver::HttpTransport`] trait over `reqwest`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Connection pooling, TLS, timeouts, query string
//! encoding and JSON (de)serialisation live here. The [`resolver`] crate sees
//! only [`resolver::HttpTransport`] and [`resolver::TransportError`].
//!
//! The transport never retries; a failed request is reported once, as is.

mod client;
mod query;

pub use client::ReqwestTransport;
pub use query::query_pairs;
