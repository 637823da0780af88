//! Per-endpoint configuration.
//!
//! An [`EndpointConfig`] is the whole description of one API operation: how
//! to build its path, how to turn caller parameters into wire parameters, how
//! to place those parameters, and how to project the response. There is no
//! per-endpoint type hierarchy; every operation is one value of this struct
//! handed to the single [`crate::Resolver`] type.
//!
//! Type parameters:
//!
//! | Parameter | Meaning |
//! |-----------|---------|
//! | `P` | logical parameters supplied by the caller |
//! | `A` | API parameters (serialised to [`crate::WireParams`]) |
//! | `R` | raw API result (deserialised from the response) |
//! | `D` | domain result exposed to callers |
//! | `J` | JSON projection of the domain result |

use crate::{BodyMode, HttpMethod, ResolverError, ResultAdapter};

/// Builds the endpoint path (without leading slash) from logical parameters.
pub type PathBuilder<P> = fn(&P) -> String;

/// Parses logical parameters into API parameters.
pub type ParamParser<P, A> = fn(&P) -> Result<A, ResolverError>;

/// Projects a raw API result into the domain result.
pub type ApiToResult<R, D> = fn(&R) -> D;

/// Projects a domain result into its JSON form.
pub type ResultToJson<D, J> = fn(&D) -> J;

/// Static description of one API operation.
pub struct EndpointConfig<P, A, R, D, J> {
    name: &'static str,
    get_path: PathBuilder<P>,
    parse_params: ParamParser<P, A>,
    api_to_result: ApiToResult<R, D>,
    result_to_json: ResultToJson<D, J>,
    method: HttpMethod,
    body_params: &'static [&'static str],
    body_mode: BodyMode,
}

impl<P, A, R, D, J> EndpointConfig<P, A, R, D, J> {
    /// Creates a GET endpoint with no body parameters.
    ///
    /// `name` is the logical operation name; it names the proxy function
    /// (`{serverUrl}/functions/{name}`).
    pub fn new(
        name: &'static str,
        get_path: PathBuilder<P>,
        parse_params: ParamParser<P, A>,
        api_to_result: ApiToResult<R, D>,
        result_to_json: ResultToJson<D, J>,
    ) -> Self {
        Self {
            name,
            get_path,
            parse_params,
            api_to_result,
            result_to_json,
            method: HttpMethod::Get,
            body_params: &[],
            body_mode: BodyMode::Property,
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Declares which wire parameters travel in the body (POST only).
    #[must_use]
    pub fn with_body_params(mut self, body_params: &'static [&'static str]) -> Self {
        self.body_params = body_params;
        self
    }

    /// Sets how body parameters are combined.
    #[must_use]
    pub fn with_body_mode(mut self, body_mode: BodyMode) -> Self {
        self.body_mode = body_mode;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn body_params(&self) -> &'static [&'static str] {
        self.body_params
    }

    pub fn body_mode(&self) -> BodyMode {
        self.body_mode
    }

    /// Builds the endpoint path for `params`.
    pub fn path(&self, params: &P) -> String {
        (self.get_path)(params)
    }

    /// Runs the endpoint's parameter parser.
    pub fn parse(&self, params: &P) -> Result<A, ResolverError> {
        (self.parse_params)(params)
    }

    /// Wraps a raw result with this endpoint's projections.
    pub fn adapt(&self, raw: R) -> ResultAdapter<R, D, J> {
        ResultAdapter::new(raw, self.api_to_result, self.result_to_json)
    }
}

impl<P, A, R, D, J> Clone for EndpointConfig<P, A, R, D, J> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<P, A, R, D, J> std::fmt::Debug for EndpointConfig<P, A, R, D, J> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("body_params", &self.body_params)
            .field("body_mode", &self.body_mode)
            .finish_non_exhaustive()
    }
}

/// Joins the API base URL and the endpoint path: `{base}/{path}`.
///
/// Path parameters are not validated. A missing one shows up as a malformed
/// URL, which the API rejects.
pub fn build_url<P, A, R, D, J>(
    base_url: &str,
    endpoint: &EndpointConfig<P, A, R, D, J>,
    params: &P,
) -> String {
    format!("{}/{}", base_url, endpoint.path(params))
}
