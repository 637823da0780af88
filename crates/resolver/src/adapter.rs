//! Lazily projected API results.

use std::sync::OnceLock;

use serde::Serialize;

use crate::endpoint::{ApiToResult, ResultToJson};

/// Wraps one raw API result together with the endpoint's projections.
///
/// The domain value and its JSON form are each computed on first access and
/// cached for the adapter's lifetime. Projections are pure, so the caching is
/// not observable beyond the saved work.
pub struct ResultAdapter<R, D, J> {
    raw: R,
    api_to_result: ApiToResult<R, D>,
    result_to_json: ResultToJson<D, J>,
    result: OnceLock<D>,
    json: OnceLock<J>,
}

impl<R, D, J> ResultAdapter<R, D, J> {
    pub fn new(raw: R, api_to_result: ApiToResult<R, D>, result_to_json: ResultToJson<D, J>) -> Self {
        Self {
            raw,
            api_to_result,
            result_to_json,
            result: OnceLock::new(),
            json: OnceLock::new(),
        }
    }

    /// The response exactly as the API returned it.
    pub fn raw(&self) -> &R {
        &self.raw
    }

    /// The domain-shaped result.
    pub fn result(&self) -> &D {
        self.result.get_or_init(|| (self.api_to_result)(&self.raw))
    }

    /// The JSON projection of [`Self::result`].
    pub fn to_json(&self) -> &J {
        self.json.get_or_init(|| (self.result_to_json)(self.result()))
    }

    /// Consumes the adapter, returning the raw response.
    pub fn into_raw(self) -> R {
        self.raw
    }
}

impl<R, D, J: Serialize> ResultAdapter<R, D, J> {
    /// Serialises the JSON projection to a pretty-printed string.
    pub fn format(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.to_json())
    }
}

impl<R: std::fmt::Debug, D, J> std::fmt::Debug for ResultAdapter<R, D, J> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultAdapter")
            .field("raw", &self.raw)
            .finish_non_exhaustive()
    }
}
