use dotkit_kanboard::ClientError;
use dotkit_kanboard::KanboardClient;
use dotkit_kanboard::KanboardConfig;
use dotkit_kanboard::RpcRequest;
use dotkit_kanboard::client::basic_authorization;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;

use super::support::RPC_PATH;
use super::support::TEST_TOKEN;
use super::support::TEST_USER;
use super::support::client_for;
use super::support::received_calls;
use super::support::rpc_error;
use super::support::rpc_result;

#[tokio::test]
async fn sends_basic_auth_and_json_content_type() {
    let server = MockServer::start().await;
    let expected_auth = basic_authorization(TEST_USER, TEST_TOKEN);

    Mock::given(method("POST"))
        .and(path(RPC_PATH))
        .and(header("authorization", expected_auth.as_str()))
        .and(header("content-type", "application/json"))
        .respond_with(rpc_result(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .call("getAllProjects", json!({}))
        .await
        .unwrap();

    assert_eq!(response.into_result().unwrap(), json!([]));
}

#[tokio::test]
async fn request_body_round_trips_at_the_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(rpc_result(json!(true)))
        .mount(&server)
        .await;

    let params = json!({"project_id": 1, "status_id": 1});
    client_for(&server)
        .call("getAllTasks", params.clone())
        .await
        .unwrap();

    let calls = received_calls(&server).await;
    assert_eq!(calls.len(), 1);
    let expected = RpcRequest::new("getAllTasks", 0, params);
    assert!(
        calls[0].same_call(&expected),
        "unexpected request: {:?}",
        calls[0]
    );
    assert_eq!(calls[0].jsonrpc, "2.0");
}

#[tokio::test]
async fn error_envelope_is_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(rpc_error(-32601, "Method not found"))
        .mount(&server)
        .await;

    let response = client_for(&server)
        .call("noSuchMethod", json!({}))
        .await
        .unwrap();

    let error = response.error.expect("error envelope");
    assert_eq!(error.code, -32601);
    assert_eq!(error.message, "Method not found");
}

#[tokio::test]
async fn error_envelope_with_http_failure_status_is_still_an_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": {"code": -32603, "message": "Internal error"}
        })))
        .mount(&server)
        .await;

    let response = client_for(&server).call("getMe", json!({})).await.unwrap();
    assert!(response.is_error());
}

#[tokio::test]
async fn unauthorized_plain_body_is_an_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Not Authorized"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .call("getMe", json!({}))
        .await
        .unwrap_err();

    match err {
        ClientError::Http { status, body, .. } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Not Authorized");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .call("getMe", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Parse { .. }), "got {err:?}");
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = KanboardConfig::new(
        format!("http://127.0.0.1:{port}{RPC_PATH}"),
        TEST_USER,
        TEST_TOKEN,
    );
    let client = KanboardClient::new(&config).unwrap();

    let err = client.call("getMe", json!({})).await.unwrap_err();
    assert!(matches!(err, ClientError::Network { .. }), "got {err:?}");
    assert!(err.to_string().contains(&port.to_string()));
}
