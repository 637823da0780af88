//! Request resolution domain for the EVM API client.
//!
//! This crate turns a logical API operation plus caller parameters into one
//! fully formed HTTP request, picks the route it travels (direct API call or
//! proxy server), and wraps the response in a lazily projected adapter.
//! Infrastructure crates implement the port traits defined here; they never
//! add resolution rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype values (`ChainId`, `Address`, `ApiKey`, `ServerUrl`, `CallId`) |
//! | [`types`] | Request shape and ambient state (`HttpMethod`, `BodyMode`, `WireParams`, `ConnectionContext`) |
//! | [`errors`] | `ResolverError`, `TransportError`, `ParseError` |
//! | [`ports`] | `HttpTransport`, `ConfigProvider`, `ConnectionProvider` |
//! | [`endpoint`] | `EndpointConfig` and the URL builder |
//! | [`params`] | Parameter classification and default injection |
//! | [`route`] | Route selection |
//! | [`adapter`] | `ResultAdapter` |
//! | [`resolver`] | `ApiContext` and `Resolver` |

pub mod adapter;
pub mod endpoint;
pub mod errors;
pub mod identifiers;
pub mod params;
pub mod ports;
pub mod resolver;
pub mod route;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use adapter::ResultAdapter;
pub use endpoint::{build_url, EndpointConfig};
pub use errors::{ParseError, ResolverError, TransportError, MISSING_ADDRESS, MISSING_SERVER_URL};
pub use identifiers::{Address, ApiKey, CallId, ChainId, ServerUrl};
pub use params::{classify, resolve_defaults, ClassifiedParams};
pub use ports::{ConfigProvider, ConnectionProvider, HttpRequest, HttpTransport, StaticConfig};
pub use resolver::{ApiContext, Resolver, ServerResponse, DEFAULT_BASE_URL};
pub use route::{select_route, Route, API_KEY_HEADER};
pub use types::{is_truthy, BodyMode, ConfigKey, ConnectionContext, HttpMethod, WireParams};
