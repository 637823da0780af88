//! Transport route selection.
//!
//! | Configuration | Route | Method | Destination |
//! |---------------|-------|--------|-------------|
//! | no API key | [`Route::Proxy`] | POST | `{serverUrl}/functions/{operation}` |
//! | API key, GET endpoint | [`Route::DirectGet`] | GET | `{baseUrl}/{path}` |
//! | API key, POST endpoint | [`Route::DirectPost`] | POST | `{baseUrl}/{path}` |

use tracing::debug;

use crate::{
    ApiKey, ConfigKey, ConfigProvider, HttpMethod, ResolverError, ServerUrl, MISSING_SERVER_URL,
};

/// Header carrying the API key on direct calls.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The dispatch path chosen for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// POST through the proxy server; the response is wrapped in `{ "result": ... }`.
    Proxy {
        /// Fully built proxy function URL.
        url: String,
    },
    /// GET straight to the API with the key in [`API_KEY_HEADER`].
    DirectGet {
        /// Credential for the `x-api-key` header.
        api_key: ApiKey,
    },
    /// POST straight to the API with the key in [`API_KEY_HEADER`].
    DirectPost {
        /// Credential for the `x-api-key` header.
        api_key: ApiKey,
    },
}

impl Route {
    /// Short label for logs and spans.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Proxy { .. } => "proxy",
            Self::DirectGet { .. } => "direct_get",
            Self::DirectPost { .. } => "direct_post",
        }
    }

    /// Headers to attach to the request. The proxy route sends none.
    pub fn headers(&self) -> Vec<(String, String)> {
        match self {
            Self::Proxy { .. } => Vec::new(),
            Self::DirectGet { api_key } | Self::DirectPost { api_key } => {
                vec![(API_KEY_HEADER.to_string(), api_key.as_str().to_string())]
            }
        }
    }
}

/// Chooses the route for `operation` from the current configuration.
///
/// Fails with [`MISSING_SERVER_URL`] when neither an API key nor a server URL
/// is configured. Empty values count as unset.
pub fn select_route(
    config: &dyn ConfigProvider,
    method: HttpMethod,
    operation: &str,
) -> Result<Route, ResolverError> {
    let route = match config.get(ConfigKey::ApiKey).and_then(ApiKey::new) {
        None => {
            let server_url = config
                .get(ConfigKey::ServerUrl)
                .and_then(ServerUrl::new)
                .ok_or_else(|| ResolverError::configuration(MISSING_SERVER_URL))?;
            Route::Proxy {
                url: server_url.function_url(operation),
            }
        }
        Some(api_key) => match method {
            HttpMethod::Get => Route::DirectGet { api_key },
            HttpMethod::Post => Route::DirectPost { api_key },
        },
    };
    debug!(route = route.label(), "Selected route");
    Ok(route)
}
