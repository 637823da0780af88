//! Read-only contract calls.

use resolver::{Address, BodyMode, ChainId, EndpointConfig, HttpMethod, ResolverError};
use serde::Serialize;
use serde_json::Value;

use crate::common::chain_param;

/// Parameters for [`run_contract_function`].
#[derive(Debug, Clone)]
pub struct RunContractFunctionParams {
    /// Contract to call.
    pub address: Address,
    pub chain: Option<ChainId>,
    /// Name of the view/pure function to invoke.
    pub function_name: String,
    /// Contract ABI (array of fragments) containing `function_name`.
    pub abi: Value,
    /// Named function arguments.
    pub params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct RunContractFunctionApiParams {
    chain: Option<String>,
    function_name: String,
    address: String,
    abi: Value,
    params: Option<Value>,
}

/// Decoded return value of a contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractOutput {
    /// Single scalar value, rendered by the API as a string.
    Scalar(String),
    /// Tuple or array return.
    Structured(Value),
}

/// `POST {address}/function`
///
/// `abi` and `params` travel in the JSON body; the rest in the query string.
pub fn run_contract_function(
) -> EndpointConfig<RunContractFunctionParams, RunContractFunctionApiParams, Value, ContractOutput, Value>
{
    EndpointConfig::new(
        "runContractFunction",
        |p| format!("{}/function", p.address.lowercase()),
        parse_run_contract_function,
        |raw| match raw {
            Value::String(s) => ContractOutput::Scalar(s.clone()),
            other => ContractOutput::Structured(other.clone()),
        },
        |output| match output {
            ContractOutput::Scalar(s) => Value::String(s.clone()),
            ContractOutput::Structured(v) => v.clone(),
        },
    )
    .with_method(HttpMethod::Post)
    .with_body_params(&["abi", "params"])
    .with_body_mode(BodyMode::Property)
}

fn parse_run_contract_function(
    p: &RunContractFunctionParams,
) -> Result<RunContractFunctionApiParams, ResolverError> {
    if p.function_name.is_empty() {
        return Err(ResolverError::invalid_params("function_name must not be empty"));
    }
    if !p.abi.is_array() {
        return Err(ResolverError::invalid_params("abi must be an array of fragments"));
    }
    Ok(RunContractFunctionApiParams {
        chain: chain_param(p.chain),
        function_name: p.function_name.clone(),
        address: p.address.lowercase(),
        abi: p.abi.clone(),
        params: p.params.clone(),
    })
}

#[cfg(test)]
mod tests {
    use resolver::classify;
    use serde_json::json;

    use super::*;

    fn params() -> RunContractFunctionParams {
        RunContractFunctionParams {
            address: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".parse().unwrap(),
            chain: Some(ChainId::ETHEREUM),
            function_name: "balanceOf".to_string(),
            abi: json!([{ "name": "balanceOf", "type": "function" }]),
            params: Some(json!({ "owner": "0x0000000000000000000000000000000000000001" })),
        }
    }

    #[test]
    fn test_abi_and_params_go_to_body() {
        let endpoint = run_contract_function();
        let api = endpoint.parse(&params()).unwrap();
        let wire = match serde_json::to_value(api).unwrap() {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        };
        let out = classify(&wire, endpoint.method(), endpoint.body_params(), endpoint.body_mode());
        assert_eq!(
            Value::Object(out.query),
            json!({
                "chain": "0x1",
                "function_name": "balanceOf",
                "address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
            })
        );
        assert_eq!(
            out.body,
            json!({
                "abi": [{ "name": "balanceOf", "type": "function" }],
                "params": { "owner": "0x0000000000000000000000000000000000000001" }
            })
        );
    }

    #[test]
    fn test_rejects_non_array_abi() {
        let mut p = params();
        p.abi = json!({ "name": "balanceOf" });
        assert!(matches!(
            run_contract_function().parse(&p),
            Err(ResolverError::InvalidParams { .. })
        ));
    }

    #[test]
    fn test_scalar_and_structured_outputs_round_through_json() {
        let endpoint = run_contract_function();
        let scalar = endpoint.adapt(json!("1000"));
        assert_eq!(*scalar.result(), ContractOutput::Scalar("1000".to_string()));
        assert_eq!(*scalar.to_json(), json!("1000"));

        let tuple = endpoint.adapt(json!(["1", "2"]));
        assert_eq!(*tuple.to_json(), json!(["1", "2"]));
    }
}
