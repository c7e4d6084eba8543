/*
[INPUT]:  Concurrent RPC calls against a mock endpoint
[OUTPUT]: Assertions on signing-session FIFO ordering and bypass
[POS]:    Integration tests - request serializer behavior
[UPDATE]: When session gating or queue semantics change
*/

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{TEST_ADDRESS, rpc_result, setup_mock_server, test_config};
use serde_json::json;
use silentdata_provider::{Sender, SilentDataError, SilentDataProvider};
use tokio_test::assert_ok;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, ResponseTemplate};

fn sender(config: silentdata_provider::ProviderConfig) -> Sender {
    Sender::new(Arc::new(SilentDataProvider::new(config).unwrap()))
}

#[tokio::test]
async fn test_signed_calls_replay_fifo() {
    let server = setup_mock_server().await;
    // first call holds the session open while the others queue
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "params": [TEST_ADDRESS, "0x1"] })))
        .respond_with(rpc_result(json!("0x1")).set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(rpc_result(json!("0x0")))
        .mount(&server)
        .await;

    let sender = sender(test_config(&server));

    let mut handles = Vec::new();
    for block in 1..=4u64 {
        let sender = sender.clone();
        handles.push(tokio::spawn(async move {
            sender
                .send("eth_getBalance", json!([TEST_ADDRESS, format!("0x{block}")]))
                .await
        }));
        // deterministic enqueue order
        tokio::time::sleep(Duration::from_millis(30)).await;
    }
    for handle in handles {
        assert_ok!(handle.await.unwrap());
    }

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);
    let blocks: Vec<String> = requests
        .iter()
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["params"][1].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(blocks, vec!["0x1", "0x2", "0x3", "0x4"]);
}

#[tokio::test]
async fn test_unsigned_call_bypasses_active_session() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "eth_getBalance" })))
        .respond_with(rpc_result(json!("0x1")).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "eth_blockNumber" })))
        .respond_with(rpc_result(json!("0x20")))
        .mount(&server)
        .await;

    let sender = sender(test_config(&server));

    let slow = {
        let sender = sender.clone();
        tokio::spawn(
            async move { sender.send("eth_getBalance", json!([TEST_ADDRESS, "latest"])).await },
        )
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    // must resolve while the signed call is still in flight
    let block = assert_ok!(
        tokio::time::timeout(
            Duration::from_millis(200),
            sender.send("eth_blockNumber", json!([])),
        )
        .await
        .unwrap()
    );
    assert_eq!(block, json!("0x20"));

    assert_ok!(slow.await.unwrap());
}

#[tokio::test]
async fn test_queued_failure_does_not_abort_later_calls() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "params": [TEST_ADDRESS, "0x1"] })))
        .respond_with(rpc_result(json!("0x1")).set_delay(Duration::from_millis(150)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "params": [TEST_ADDRESS, "0x2"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0", "id": 1,
            "error": { "code": -32000, "message": "execution reverted" },
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(rpc_result(json!("0x3")))
        .mount(&server)
        .await;

    let sender = sender(test_config(&server));

    let mut handles = Vec::new();
    for block in 1..=3u64 {
        let sender = sender.clone();
        handles.push(tokio::spawn(async move {
            sender
                .send("eth_getBalance", json!([TEST_ADDRESS, format!("0x{block}")]))
                .await
        }));
        tokio::time::sleep(Duration::from_millis(30)).await;
    }

    let results: Vec<_> = futures_ordered(handles).await;
    assert_eq!(results[0].as_ref().unwrap(), &json!("0x1"));
    assert!(matches!(results[1], Err(SilentDataError::Rpc { code: -32000, .. })));
    assert_eq!(results[2].as_ref().unwrap(), &json!("0x3"));
}

async fn futures_ordered(
    handles: Vec<tokio::task::JoinHandle<silentdata_provider::Result<serde_json::Value>>>,
) -> Vec<silentdata_provider::Result<serde_json::Value>> {
    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }
    results
}
