//! The resolver: one call from logical parameters to an adapted result.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::endpoint::build_url;
use crate::params::{classify, resolve_defaults, ClassifiedParams};
use crate::route::{select_route, Route};
use crate::{
    CallId, ConfigProvider, ConnectionProvider, EndpointConfig, HttpRequest, HttpTransport,
    ResolverError, ResultAdapter, WireParams,
};

/// Default base URL of the EVM API.
pub const DEFAULT_BASE_URL: &str = "https://deep-index.moralis.io/api/v2";

// ---------------------------------------------------------------------------
// Shared context
// ---------------------------------------------------------------------------

/// Infrastructure shared by every resolver: transport, configuration and
/// wallet connection, plus the API base URL.
///
/// Cheap to clone; all members are reference counted.
#[derive(Clone)]
pub struct ApiContext {
    transport: Arc<dyn HttpTransport>,
    config: Arc<dyn ConfigProvider>,
    connection: Arc<dyn ConnectionProvider>,
    base_url: String,
}

impl ApiContext {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        config: Arc<dyn ConfigProvider>,
        connection: Arc<dyn ConnectionProvider>,
    ) -> Self {
        Self {
            transport,
            config,
            connection,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL. A trailing slash is ignored.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiContext")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Proxy responses wrap the API result one level deeper.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerResponse<R> {
    pub result: R,
}

/// Resolves and dispatches calls for one endpoint.
///
/// Every [`Resolver::fetch`] builds its own parameter maps and adapter; a
/// resolver can be shared across tasks and called concurrently.
pub struct Resolver<P, A, R, D, J> {
    endpoint: EndpointConfig<P, A, R, D, J>,
    context: ApiContext,
}

impl<P, A, R, D, J> Resolver<P, A, R, D, J>
where
    A: Serialize,
    R: DeserializeOwned,
{
    pub fn new(endpoint: EndpointConfig<P, A, R, D, J>, context: ApiContext) -> Self {
        Self { endpoint, context }
    }

    pub fn endpoint(&self) -> &EndpointConfig<P, A, R, D, J> {
        &self.endpoint
    }

    /// Resolves `params` into a request, sends it over the selected route and
    /// wraps the response.
    ///
    /// Configuration and parameter errors are returned before any request is
    /// sent. Transport errors are returned unchanged.
    pub async fn fetch(&self, params: &P) -> Result<ResultAdapter<R, D, J>, ResolverError> {
        let call_id = CallId::new_random();
        let span = info_span!(
            "evm_api.fetch",
            operation = self.endpoint.name(),
            %call_id,
            route = tracing::field::Empty,
        );
        async move {
            let result = self.fetch_inner(params).await;
            if let Err(err) = &result {
                warn!(error = %err, "EVM API call failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn fetch_inner(&self, params: &P) -> Result<ResultAdapter<R, D, J>, ResolverError> {
        let route = select_route(
            self.context.config.as_ref(),
            self.endpoint.method(),
            self.endpoint.name(),
        )?;
        tracing::Span::current().record("route", route.label());

        let url = match &route {
            Route::Proxy { url } => url.clone(),
            Route::DirectGet { .. } | Route::DirectPost { .. } => {
                build_url(&self.context.base_url, &self.endpoint, params)
            }
        };

        let wire = self.wire_params(params)?;
        let ClassifiedParams { query, body } = classify(
            &wire,
            self.endpoint.method(),
            self.endpoint.body_params(),
            self.endpoint.body_mode(),
        );
        debug!(
            query_params = query.len(),
            body_is_object = body.is_object(),
            "Classified parameters"
        );

        let headers = route.headers();
        info!(%url, "Dispatching request");
        let raw = match route {
            Route::DirectGet { .. } => {
                let request = HttpRequest {
                    url,
                    query,
                    body: None,
                    headers,
                };
                let response = self.context.transport.get(request).await?;
                self.decode::<R>(response)?
            }
            Route::DirectPost { .. } => {
                let request = HttpRequest {
                    url,
                    query,
                    body: Some(body),
                    headers,
                };
                let response = self.context.transport.post(request).await?;
                self.decode::<R>(response)?
            }
            Route::Proxy { .. } => {
                let request = HttpRequest {
                    url,
                    query,
                    body: Some(body),
                    headers,
                };
                let response = self.context.transport.post(request).await?;
                self.decode::<ServerResponse<R>>(response)?.result
            }
        };

        Ok(self.endpoint.adapt(raw))
    }

    /// Parses logical parameters and applies connection defaults.
    fn wire_params(&self, params: &P) -> Result<WireParams, ResolverError> {
        let api_params = self.endpoint.parse(params)?;
        let wire = match serde_json::to_value(api_params) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(ResolverError::invalid_params(format!(
                    "'{}' parameters must serialise to an object, got {}",
                    self.endpoint.name(),
                    other
                )))
            }
            Err(err) => return Err(ResolverError::invalid_params(err.to_string())),
        };
        resolve_defaults(wire, &self.context.connection.connection())
    }

    fn decode<T: DeserializeOwned>(&self, response: Value) -> Result<T, ResolverError> {
        serde_json::from_value(response).map_err(|source| ResolverError::Decode {
            operation: self.endpoint.name(),
            source,
        })
    }
}

impl<P, A, R, D, J> std::fmt::Debug for Resolver<P, A, R, D, J> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("endpoint", &self.endpoint)
            .field("context", &self.context)
            .finish()
    }
}
