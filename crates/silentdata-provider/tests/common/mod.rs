/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for silentdata-provider tests

use serde_json::{Value, json};
use silentdata_provider::ProviderConfig;
use wiremock::{MockServer, ResponseTemplate};

/// A well-known test private key
pub const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Address of [`TEST_KEY`]
#[allow(dead_code)]
pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Setup a mock RPC server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Provider configuration pointed at the mock server
pub fn test_config(server: &MockServer) -> ProviderConfig {
    let mut config = ProviderConfig::new(server.uri());
    config.private_key = Some(TEST_KEY.to_string());
    config
}

/// A successful JSON-RPC response carrying `result`
pub fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result,
    }))
}
