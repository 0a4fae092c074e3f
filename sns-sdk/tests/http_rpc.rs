//! JSON-RPC transport tests against a mock HTTP server.
//!
//! ```bash
//! cargo test -p sns-sdk --features http-rpc --test http_rpc
//! ```
//!
//! The mainnet test is `#[ignore]`d and reads `SNS_RPC_URL` when set.

#![cfg(feature = "http-rpc")]

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;
use sns_sdk::config::{Commitment, ResolveConfig, RpcConfig};
use sns_sdk::constants::{NAME_PROGRAM_ID, ROOT_DOMAIN_ACCOUNT};
use sns_sdk::non_blocking::{get_all_domains, resolve};
use sns_sdk::test_utils::registry_account;
use sns_sdk::transport::{HttpRpcClient, RpcTransport};
use sns_sdk::{get_domain_key, Pubkey, SnsError};
use wiremock::{
    matchers::{body_partial_json, method},
    Mock, MockServer, ResponseTemplate,
};

fn ui_account(data: &[u8]) -> serde_json::Value {
    json!({
        "data": [STANDARD.encode(data), "base64"],
        "executable": false,
        "lamports": 2_000_000,
        "owner": NAME_PROGRAM_ID.to_string(),
        "rentEpoch": 0,
        "space": data.len()
    })
}

fn rpc_result(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result
    }))
}

fn client(server: &MockServer) -> HttpRpcClient {
    HttpRpcClient::new(RpcConfig::new(server.uri()).with_timeout(5)).unwrap()
}

// ============================================================================
// Account reads
// ============================================================================

#[tokio::test]
async fn test_get_account_info_mock() {
    let mock_server = MockServer::start().await;
    let owner = Pubkey::new_from_array([7; 32]);
    let data = registry_account(ROOT_DOMAIN_ACCOUNT, owner, Pubkey::default(), vec![1, 2, 3]);

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "getAccountInfo",
            "params": [NAME_PROGRAM_ID.to_string(), { "encoding": "base64", "commitment": "finalized" }]
        })))
        .respond_with(rpc_result(json!({
            "context": { "slot": 1 },
            "value": ui_account(&data)
        })))
        .mount(&mock_server)
        .await;

    let rpc = HttpRpcClient::new(
        RpcConfig::new(mock_server.uri()).with_commitment(Commitment::Finalized),
    )
    .unwrap();
    let account = rpc.fetch_account(&NAME_PROGRAM_ID).await.unwrap().unwrap();

    assert_eq!(account.data, data);
    assert_eq!(account.owner, NAME_PROGRAM_ID);
    assert_eq!(account.lamports, 2_000_000);
}

#[tokio::test]
async fn test_get_account_info_missing_mock() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getAccountInfo" })))
        .respond_with(rpc_result(json!({
            "context": { "slot": 1 },
            "value": null
        })))
        .mount(&mock_server)
        .await;

    let account = client(&mock_server)
        .fetch_account(&Pubkey::default())
        .await
        .unwrap();
    assert!(account.is_none());
}

#[tokio::test]
async fn test_get_multiple_accounts_keeps_order_mock() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getMultipleAccounts" })))
        .respond_with(rpc_result(json!({
            "context": { "slot": 1 },
            "value": [ui_account(&[1]), null, ui_account(&[3])]
        })))
        .mount(&mock_server)
        .await;

    let keys = [
        Pubkey::new_from_array([1; 32]),
        Pubkey::new_from_array([2; 32]),
        Pubkey::new_from_array([3; 32]),
    ];
    let accounts = client(&mock_server).fetch_accounts(&keys).await.unwrap();

    assert_eq!(accounts.len(), 3);
    assert_eq!(accounts[0].as_ref().unwrap().data, vec![1]);
    assert!(accounts[1].is_none());
    assert_eq!(accounts[2].as_ref().unwrap().data, vec![3]);
}

#[tokio::test]
async fn test_get_multiple_accounts_chunks_requests_mock() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getMultipleAccounts" })))
        .respond_with(rpc_result(json!({
            "context": { "slot": 1 },
            "value": [ui_account(&[9]), ui_account(&[9])]
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let rpc = HttpRpcClient::new(
        RpcConfig::new(mock_server.uri()).with_max_accounts_per_request(2),
    )
    .unwrap();
    let keys = [Pubkey::default(); 4];
    let accounts = rpc.fetch_accounts(&keys).await.unwrap();
    assert_eq!(accounts.len(), 4);
    assert!(accounts.iter().all(|account| account.is_some()));
}

#[tokio::test]
async fn test_get_multiple_accounts_short_response_mock() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getMultipleAccounts" })))
        .respond_with(rpc_result(json!({
            "context": { "slot": 1 },
            "value": [null]
        })))
        .mount(&mock_server)
        .await;

    let result = client(&mock_server)
        .fetch_accounts(&[Pubkey::default(), Pubkey::default()])
        .await;
    assert!(matches!(result, Err(SnsError::Serialization(_))));
}

// ============================================================================
// Program account scans
// ============================================================================

#[tokio::test]
async fn test_get_all_domains_mock() {
    let mock_server = MockServer::start().await;
    let owner = Pubkey::new_from_array([7; 32]);
    let domain = get_domain_key("bonfida", None).unwrap().address;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "getProgramAccounts",
            "params": [NAME_PROGRAM_ID.to_string(), {
                "filters": [
                    { "memcmp": { "offset": 32, "bytes": owner.to_string() } },
                    { "memcmp": { "offset": 0, "bytes": ROOT_DOMAIN_ACCOUNT.to_string() } }
                ],
                "dataSlice": { "offset": 0, "length": 0 }
            }]
        })))
        .respond_with(rpc_result(json!([
            { "pubkey": domain.to_string(), "account": ui_account(&[]) }
        ])))
        .mount(&mock_server)
        .await;

    let domains = get_all_domains(&client(&mock_server), &owner).await.unwrap();
    assert_eq!(domains, vec![domain]);
}

// ============================================================================
// Error mapping
// ============================================================================

#[tokio::test]
async fn test_rate_limited_mock() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too many requests"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .fetch_account(&Pubkey::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SnsError::RateLimited { .. }));
    assert!(err.is_retryable());
    assert_eq!(err.retry_after_ms(), Some(5000));
}

#[tokio::test]
async fn test_server_error_mock() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .fetch_account(&Pubkey::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SnsError::Transport(ref msg) if msg.contains("503")));
}

#[tokio::test]
async fn test_json_rpc_error_mock() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32602, "message": "Invalid param: WrongSize" }
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .fetch_account(&Pubkey::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SnsError::Transport(ref msg) if msg.contains("WrongSize")));
}

#[tokio::test]
async fn test_connection_refused() {
    let rpc = HttpRpcClient::new(RpcConfig::new("http://127.0.0.1:1").with_timeout(2)).unwrap();
    let err = rpc.fetch_account(&Pubkey::default()).await.unwrap_err();
    assert!(matches!(
        err,
        SnsError::ConnectionFailed { .. } | SnsError::ConnectionTimeout { .. } | SnsError::Transport(_)
    ));
}

// ============================================================================
// Mainnet (requires network access)
// ============================================================================

#[tokio::test]
#[ignore = "requires network access"]
async fn test_resolve_bonfida_mainnet() {
    let config = RpcConfig::from_env()
        .unwrap_or_else(|| Ok(RpcConfig::mainnet()))
        .unwrap();
    let rpc = HttpRpcClient::new(config).unwrap();
    let target = resolve(&rpc, "bonfida", &ResolveConfig::allowing_pda())
        .await
        .unwrap();
    println!("bonfida.sol -> {target}");
}
