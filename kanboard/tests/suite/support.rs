//! Mock Kanboard endpoint helpers.

use dotkit_kanboard::KanboardClient;
use dotkit_kanboard::KanboardConfig;
use dotkit_kanboard::RpcRequest;
use serde_json::Value;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::body_partial_json;
use wiremock::matchers::method;
use wiremock::matchers::path;

pub const RPC_PATH: &str = "/jsonrpc.php";
pub const TEST_USER: &str = "jsonrpc";
pub const TEST_TOKEN: &str = "test-token";

pub fn config_for(server: &MockServer) -> KanboardConfig {
    KanboardConfig::new(format!("{}{RPC_PATH}", server.uri()), TEST_USER, TEST_TOKEN)
}

pub fn client_for(server: &MockServer) -> KanboardClient {
    KanboardClient::new(&config_for(server)).expect("client")
}

pub fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result,
    }))
}

pub fn rpc_error(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": {"code": code, "message": message},
    }))
}

/// Answer every call to `rpc_method` with `response`, asserting the call count
/// when the server is dropped.
pub async fn mount_method(
    server: &MockServer,
    rpc_method: &str,
    response: ResponseTemplate,
    expected_calls: u64,
) {
    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(body_partial_json(json!({ "method": rpc_method })))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Every JSON-RPC request the server saw, in arrival order.
pub async fn received_calls(server: &MockServer) -> Vec<RpcRequest> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .map(|request| request.body_json::<RpcRequest>().expect("JSON-RPC body"))
        .collect()
}

pub async fn calls_to(server: &MockServer, rpc_method: &str) -> Vec<RpcRequest> {
    received_calls(server)
        .await
        .into_iter()
        .filter(|call| call.method == rpc_method)
        .collect()
}
