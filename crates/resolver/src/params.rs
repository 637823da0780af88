//! Wire parameter placement and default injection.
//!
//! Both functions are pure: they read their inputs, allocate fresh outputs and
//! touch no shared state.

use serde_json::Value;
use tracing::debug;

use crate::{
    is_truthy, BodyMode, ConnectionContext, HttpMethod, ResolverError, WireParams, MISSING_ADDRESS,
};

/// Wire parameter carrying the chain in API hex form.
pub const CHAIN_PARAM: &str = "chain";

/// Wire parameter carrying the lowercase account address.
pub const ADDRESS_PARAM: &str = "address";

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Query and body parts of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedParams {
    /// Parameters for the query string.
    pub query: WireParams,
    /// Request body. An empty object when no parameter qualifies.
    pub body: Value,
}

/// Splits wire parameters into query and body parts.
///
/// A parameter goes to the body only when `method` is POST and its name is
/// listed in `body_params`; everything else goes to the query string. Falsy
/// values (see [`is_truthy`]) are dropped from both parts, so a legitimate
/// `0` or `false` never reaches the API.
///
/// In [`BodyMode::Replace`] the body is the last body parameter's value
/// itself rather than an object wrapping it.
pub fn classify(
    params: &WireParams,
    method: HttpMethod,
    body_params: &[&str],
    body_mode: BodyMode,
) -> ClassifiedParams {
    let is_body_param =
        |name: &str| method == HttpMethod::Post && body_params.iter().any(|p| *p == name);

    let mut query = WireParams::new();
    let mut body_fields = WireParams::new();
    let mut replacement: Option<&Value> = None;

    for (name, value) in params {
        if !is_truthy(value) {
            continue;
        }
        if !is_body_param(name.as_str()) {
            query.insert(name.clone(), value.clone());
            continue;
        }
        match body_mode {
            BodyMode::Property => {
                body_fields.insert(name.clone(), value.clone());
            }
            BodyMode::Replace => replacement = Some(value),
        }
    }

    let body = match replacement {
        Some(value) => value.clone(),
        None => Value::Object(body_fields),
    };

    ClassifiedParams { query, body }
}

// ---------------------------------------------------------------------------
// Default injection
// ---------------------------------------------------------------------------

/// Fills `chain` and `address` from the wallet connection.
///
/// - Not connected: fails with [`MISSING_ADDRESS`] when `params` declares an
///   `address` key whose value is falsy. Parameters without an `address` key
///   pass through unchanged.
/// - Connected: sets `chain` to the connected chain's API hex form and
///   `address` to the lowercase account, each only when absent or `null`.
///   Caller-supplied values always win.
pub fn resolve_defaults(
    mut params: WireParams,
    connection: &ConnectionContext,
) -> Result<WireParams, ResolverError> {
    match connection {
        ConnectionContext::Disconnected => {
            if params.get(ADDRESS_PARAM).is_some_and(|v| !is_truthy(v)) {
                return Err(ResolverError::configuration(MISSING_ADDRESS));
            }
        }
        ConnectionContext::Connected { chain, account } => {
            if is_unset(&params, CHAIN_PARAM) {
                debug!(chain = %chain, "Defaulting chain from wallet connection");
                params.insert(CHAIN_PARAM.to_string(), Value::String(chain.api_hex()));
            }
            if is_unset(&params, ADDRESS_PARAM) {
                debug!("Defaulting address from wallet connection");
                params.insert(ADDRESS_PARAM.to_string(), Value::String(account.lowercase()));
            }
        }
    }
    Ok(params)
}

fn is_unset(params: &WireParams, name: &str) -> bool {
    params.get(name).map_or(true, Value::is_null)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{Address, ChainId};

    fn wire(value: Value) -> WireParams {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn account() -> Address {
        "0xABCDEF0000000000000000000000000000000001".parse().unwrap()
    }

    // -- classify -----------------------------------------------------------

    #[test]
    fn test_get_never_produces_body_params() {
        let params = wire(json!({ "abi": [1], "chain": "0x1", "params": { "a": 1 } }));
        let out = classify(&params, HttpMethod::Get, &["abi", "params"], BodyMode::Property);
        assert_eq!(out.body, json!({}));
        assert_eq!(out.query, params);
    }

    #[test]
    fn test_post_places_declared_truthy_params_in_body() {
        let params = wire(json!({
            "chain": "0x1",
            "function_name": "balanceOf",
            "abi": [{ "name": "balanceOf" }],
            "params": { "owner": "0x0" },
        }));
        let out = classify(&params, HttpMethod::Post, &["abi", "params"], BodyMode::Property);
        assert_eq!(
            Value::Object(out.query),
            json!({ "chain": "0x1", "function_name": "balanceOf" })
        );
        assert_eq!(
            out.body,
            json!({ "abi": [{ "name": "balanceOf" }], "params": { "owner": "0x0" } })
        );
    }

    #[test]
    fn test_post_without_declared_body_params_sends_everything_in_query() {
        let params = wire(json!({ "chain": "0x1", "limit": 10 }));
        let out = classify(&params, HttpMethod::Post, &[], BodyMode::Property);
        assert_eq!(out.query, params);
        assert_eq!(out.body, json!({}));
    }

    #[test]
    fn test_falsy_values_are_dropped_from_query_and_body() {
        let params = wire(json!({ "address": "", "chain": "0x1" }));
        let out = classify(&params, HttpMethod::Get, &[], BodyMode::Property);
        assert_eq!(Value::Object(out.query), json!({ "chain": "0x1" }));

        let params = wire(json!({ "offset": 0, "abi": null, "flag": false, "cursor": "c" }));
        let out = classify(&params, HttpMethod::Post, &["abi", "flag"], BodyMode::Property);
        assert_eq!(Value::Object(out.query), json!({ "cursor": "c" }));
        assert_eq!(out.body, json!({}));
    }

    #[test]
    fn test_replace_mode_uses_raw_value_as_body() {
        let params = wire(json!({ "payload": [1, 2, 3] }));
        let out = classify(&params, HttpMethod::Post, &["payload"], BodyMode::Replace);
        assert_eq!(out.body, json!([1, 2, 3]));
        assert!(out.query.is_empty());
    }

    #[test]
    fn test_replace_mode_takes_last_body_value() {
        let params = wire(json!({ "first": "a", "chain": "0x1", "second": "b" }));
        let out = classify(&params, HttpMethod::Post, &["first", "second"], BodyMode::Replace);
        assert_eq!(out.body, json!("b"));
        assert_eq!(Value::Object(out.query), json!({ "chain": "0x1" }));
    }

    #[test]
    fn test_replace_mode_keeps_earlier_value_when_later_one_is_falsy() {
        let params = wire(json!({ "payload": [1], "payload2": 0 }));
        let out = classify(&params, HttpMethod::Post, &["payload", "payload2"], BodyMode::Replace);
        assert_eq!(out.body, json!([1]));
        assert!(out.query.is_empty());
    }

    #[test]
    fn test_replace_mode_without_value_leaves_empty_object() {
        let params = wire(json!({ "payload": null, "chain": "0x1" }));
        let out = classify(&params, HttpMethod::Post, &["payload"], BodyMode::Replace);
        assert_eq!(out.body, json!({}));
        assert_eq!(Value::Object(out.query), json!({ "chain": "0x1" }));
    }

    #[test]
    fn test_replace_mode_on_get_sends_declared_params_in_query() {
        let params = wire(json!({ "payload": [1, 2] }));
        let out = classify(&params, HttpMethod::Get, &["payload"], BodyMode::Replace);
        assert_eq!(out.body, json!({}));
        assert_eq!(out.query, params);
    }

    #[test]
    fn test_query_preserves_insertion_order() {
        let params = wire(json!({ "z": "1", "a": "2", "m": "3" }));
        let out = classify(&params, HttpMethod::Get, &[], BodyMode::Property);
        let keys: Vec<&str> = out.query.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_classification_is_repeatable() {
        let params = wire(json!({ "abi": [1], "chain": "0x1", "empty": "" }));
        let first = classify(&params, HttpMethod::Post, &["abi"], BodyMode::Property);
        let second = classify(&params, HttpMethod::Post, &["abi"], BodyMode::Property);
        assert_eq!(first, second);
    }

    // -- resolve_defaults ---------------------------------------------------

    #[test]
    fn test_disconnected_with_missing_address_is_a_configuration_error() {
        let params = wire(json!({ "address": null, "chain": "0x1" }));
        let err = resolve_defaults(params, &ConnectionContext::Disconnected).unwrap_err();
        assert!(matches!(err, ResolverError::Configuration { .. }));
        assert!(err.to_string().contains("address is required"));
    }

    #[test]
    fn test_disconnected_with_empty_address_is_a_configuration_error() {
        let params = wire(json!({ "address": "" }));
        assert!(resolve_defaults(params, &ConnectionContext::Disconnected).is_err());
    }

    #[test]
    fn test_disconnected_without_address_field_passes_through() {
        let params = wire(json!({ "block_number_or_hash": "100" }));
        let out = resolve_defaults(params.clone(), &ConnectionContext::Disconnected).unwrap();
        assert_eq!(out, params);
    }

    #[test]
    fn test_connected_fills_chain_and_lowercase_address() {
        let connection = ConnectionContext::connected(ChainId::new(1), account());
        let out = resolve_defaults(WireParams::new(), &connection).unwrap();
        assert_eq!(
            Value::Object(out),
            json!({ "chain": "0x1", "address": "0xabcdef0000000000000000000000000000000001" })
        );
    }

    #[test]
    fn test_connected_fills_null_values_in_place() {
        let connection = ConnectionContext::connected(ChainId::POLYGON, account());
        let params = wire(json!({ "address": null, "chain": null, "limit": 5 }));
        let out = resolve_defaults(params, &connection).unwrap();
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(keys, ["address", "chain", "limit"]);
        assert_eq!(out["chain"], json!("0x89"));
    }

    #[test]
    fn test_explicit_values_win_over_connection_defaults() {
        let connection = ConnectionContext::connected(ChainId::new(1), account());
        let params = wire(json!({ "chain": "0x38", "address": "0x1111111111111111111111111111111111111111" }));
        let out = resolve_defaults(params.clone(), &connection).unwrap();
        assert_eq!(out, params);
    }

    #[test]
    fn test_connected_keeps_explicit_empty_strings() {
        let connection = ConnectionContext::connected(ChainId::new(1), account());
        let params = wire(json!({ "chain": "" }));
        let out = resolve_defaults(params, &connection).unwrap();
        assert_eq!(out["chain"], json!(""));
    }
}
