//! End-to-end resolver calls over the real `reqwest` transport against a
//! `wiremock` server.

use std::sync::Arc;

use endpoints::{
    BlockId, BlockParams, EvmApi, IpfsFile, NativeBalanceParams, RunContractFunctionParams,
    TokenBalancesParams, UploadFolderParams,
};
use resolver::{
    Address, ApiContext, ChainId, ConfigKey, ConnectionContext, ResolverError, StaticConfig,
    TransportError,
};
use serde_json::json;
use transport::ReqwestTransport;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ADDRESS: &str = "0xD8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
const ADDRESS_LOWER: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";

fn direct_api(server: &MockServer) -> EvmApi {
    api(
        server,
        StaticConfig::new().with(ConfigKey::ApiKey, "test-key"),
        ConnectionContext::Disconnected,
    )
}

fn proxy_api(server: &MockServer) -> EvmApi {
    api(
        server,
        StaticConfig::new().with(ConfigKey::ServerUrl, format!("{}/server", server.uri())),
        ConnectionContext::Disconnected,
    )
}

fn api(server: &MockServer, config: StaticConfig, connection: ConnectionContext) -> EvmApi {
    let transport = ReqwestTransport::new().unwrap();
    let context = ApiContext::new(Arc::new(transport), Arc::new(config), Arc::new(connection))
        .with_base_url(format!("{}/api/v2", server.uri()));
    EvmApi::new(context)
}

fn address() -> Address {
    ADDRESS.parse().unwrap()
}

#[tokio::test]
async fn test_direct_get_sends_key_and_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v2/{ADDRESS_LOWER}/balance")))
        .and(query_param("chain", "0x1"))
        .and(query_param("address", ADDRESS_LOWER))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "balance": "1000000000000000000"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let params = NativeBalanceParams {
        address: Some(address()),
        chain: Some(ChainId::ETHEREUM),
        to_block: None,
    };
    let result = direct_api(&mock_server)
        .get_native_balance(&params)
        .await
        .unwrap();

    assert_eq!(result.result().ether(), "1");
    assert_eq!(
        serde_json::to_value(result.to_json()).unwrap(),
        json!({ "balance": "1000000000000000000", "ether": "1" })
    );
}

#[tokio::test]
async fn test_direct_get_repeats_array_query_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v2/{ADDRESS_LOWER}/erc20")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let params = TokenBalancesParams {
        address: Some(address()),
        chain: Some(ChainId::POLYGON),
        to_block: None,
        token_addresses: vec![
            "0x1111111111111111111111111111111111111111".parse().unwrap(),
            "0x2222222222222222222222222222222222222222".parse().unwrap(),
        ],
    };
    let result = direct_api(&mock_server)
        .get_token_balances(&params)
        .await
        .unwrap();
    assert!(result.result().is_empty());

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let tokens: Vec<String> = requests[0]
        .url
        .query_pairs()
        .filter(|(k, _)| k == "token_addresses")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(
        tokens,
        [
            "0x1111111111111111111111111111111111111111",
            "0x2222222222222222222222222222222222222222"
        ]
    );
}

#[tokio::test]
async fn test_direct_post_splits_query_and_body() {
    let mock_server = MockServer::start().await;

    let abi = json!([{
        "name": "balanceOf",
        "type": "function",
        "inputs": [{ "name": "owner", "type": "address" }],
        "outputs": [{ "name": "", "type": "uint256" }]
    }]);

    Mock::given(method("POST"))
        .and(path(format!("/api/v2/{ADDRESS_LOWER}/function")))
        .and(query_param("function_name", "balanceOf"))
        .and(query_param("chain", "0x1"))
        .and(header("x-api-key", "test-key"))
        .and(body_json(json!({
            "abi": abi.clone(),
            "params": { "owner": ADDRESS_LOWER }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("42")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let params = RunContractFunctionParams {
        address: address(),
        chain: Some(ChainId::ETHEREUM),
        function_name: "balanceOf".to_string(),
        abi,
        params: Some(json!({ "owner": ADDRESS_LOWER })),
    };
    let result = direct_api(&mock_server)
        .run_contract_function(&params)
        .await
        .unwrap();

    assert_eq!(*result.to_json(), json!("42"));
}

#[tokio::test]
async fn test_proxy_posts_to_function_and_unwraps_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/server/functions/getBlock"))
        .and(query_param("chain", "0x89"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "hash": "0xabc",
                "number": "100",
                "timestamp": "2021-05-07T11:08:35.000Z",
                "miner": "0x0000000000000000000000000000000000000000",
                "gas_used": "10",
                "gas_limit": "20",
                "transaction_count": 1
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let params = BlockParams {
        block: BlockId::Number(100),
        chain: Some(ChainId::POLYGON),
    };
    let result = proxy_api(&mock_server).get_block(&params).await.unwrap();
    assert_eq!(result.result().number, 100);
    assert_eq!(result.to_json().gas_utilisation, 50.0);

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("x-api-key").is_none());
}

#[tokio::test]
async fn test_proxy_upload_folder_sends_bare_array_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/server/functions/uploadFolder"))
        .and(body_json(json!([{ "path": "logo.jpg", "content": "aGVsbG8=" }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{ "path": "https://ipfs.moralis.io:2053/ipfs/QmCid/logo.jpg" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let params = UploadFolderParams {
        files: vec![IpfsFile {
            path: "logo.jpg".to_string(),
            content: "aGVsbG8=".to_string(),
        }],
    };
    let result = proxy_api(&mock_server).upload_folder(&params).await.unwrap();
    assert_eq!(result.result()[0].cid(), Some("QmCid"));
}

#[tokio::test]
async fn test_connected_wallet_fills_defaults_on_the_wire() {
    let mock_server = MockServer::start().await;

    // The path comes from the caller's params, so an omitted address leaves
    // its segment empty even though the query carries the connected account.
    Mock::given(method("GET"))
        .and(path("/api/v2//balance"))
        .and(query_param("chain", "0x38"))
        .and(query_param("address", ADDRESS_LOWER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "balance": "0" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api(
        &mock_server,
        StaticConfig::new().with(ConfigKey::ApiKey, "test-key"),
        ConnectionContext::connected(ChainId::BSC, address()),
    );
    let result = api
        .get_native_balance(&NativeBalanceParams::default())
        .await
        .unwrap();
    assert_eq!(result.result().ether(), "0");
}

#[tokio::test]
async fn test_error_status_is_returned_unchanged() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid key"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let params = BlockParams {
        block: BlockId::Number(1),
        chain: None,
    };
    let err = direct_api(&mock_server).get_block(&params).await.unwrap_err();

    match err {
        ResolverError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "Invalid key");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_success_body_is_a_transport_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let params = BlockParams {
        block: BlockId::Number(1),
        chain: None,
    };
    let err = direct_api(&mock_server).get_block(&params).await.unwrap_err();
    assert!(matches!(
        err,
        ResolverError::Transport(TransportError::Decode { .. })
    ));
}

#[tokio::test]
async fn test_missing_configuration_sends_nothing() {
    let mock_server = MockServer::start().await;

    let api = api(&mock_server, StaticConfig::new(), ConnectionContext::Disconnected);
    let params = BlockParams {
        block: BlockId::Number(1),
        chain: None,
    };
    let err = api.get_block(&params).await.unwrap_err();

    assert!(matches!(err, ResolverError::Configuration { .. }));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_server_is_a_request_error() {
    let transport = ReqwestTransport::new().unwrap();
    let context = ApiContext::new(
        Arc::new(transport),
        Arc::new(StaticConfig::new().with(ConfigKey::ApiKey, "test-key")),
        Arc::new(ConnectionContext::Disconnected),
    )
    .with_base_url("http://127.0.0.1:1");
    let params = BlockParams {
        block: BlockId::Number(1),
        chain: None,
    };
    let err = EvmApi::new(context).get_block(&params).await.unwrap_err();
    assert!(matches!(
        err,
        ResolverError::Transport(TransportError::Request { .. })
    ));
}
