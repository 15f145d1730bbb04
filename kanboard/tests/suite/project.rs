use dotkit_kanboard::ops::Advisory;
use dotkit_kanboard::ops::NewProject;
use dotkit_kanboard::ops::OperationError;
use dotkit_kanboard::ops::PROJECT_MANAGER_ROLE;
use dotkit_kanboard::ops::create_project_with_owner;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::MockServer;

use super::support::calls_to;
use super::support::client_for;
use super::support::mount_method;
use super::support::received_calls;
use super::support::rpc_error;
use super::support::rpc_result;

fn new_project() -> NewProject {
    NewProject {
        name: "Homelab".to_string(),
        description: "Rack and cabling".to_string(),
        owner_id: 1,
    }
}

fn project_details(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Homelab",
        "url": {
            "board": format!("http://kb.local/board/{id}"),
            "list": format!("http://kb.local/list/{id}"),
        }
    })
}

#[tokio::test]
async fn creates_assigns_and_fetches_project() {
    let server = MockServer::start().await;
    mount_method(&server, "createProject", rpc_result(json!(12)), 1).await;
    mount_method(&server, "addProjectUser", rpc_result(json!(true)), 1).await;
    mount_method(&server, "getProjectById", rpc_result(project_details(12)), 1).await;

    let report = create_project_with_owner(&client_for(&server), &new_project())
        .await
        .unwrap();

    assert_eq!(report.project_id, 12);
    assert_eq!(report.membership, Advisory::Done);
    assert_eq!(report.board_url(), Some("http://kb.local/board/12"));
    assert_eq!(report.list_url(), Some("http://kb.local/list/12"));

    let methods: Vec<String> = received_calls(&server)
        .await
        .into_iter()
        .map(|call| call.method)
        .collect();
    assert_eq!(methods, ["createProject", "addProjectUser", "getProjectById"]);

    let create = &calls_to(&server, "createProject").await[0];
    assert_eq!(
        create.params,
        json!({"name": "Homelab", "description": "Rack and cabling", "owner_id": 1})
    );
    let add_user = &calls_to(&server, "addProjectUser").await[0];
    assert_eq!(
        add_user.params,
        json!({"project_id": 12, "user_id": 1, "role": PROJECT_MANAGER_ROLE})
    );
    let fetch = &calls_to(&server, "getProjectById").await[0];
    assert_eq!(fetch.params, json!({"project_id": 12}));
}

#[tokio::test]
async fn create_error_aborts_before_follow_up_calls() {
    let server = MockServer::start().await;
    mount_method(
        &server,
        "createProject",
        rpc_error(-32000, "Project name already taken"),
        1,
    )
    .await;
    mount_method(&server, "addProjectUser", rpc_result(json!(true)), 0).await;
    mount_method(&server, "getProjectById", rpc_result(project_details(1)), 0).await;

    let err = create_project_with_owner(&client_for(&server), &new_project())
        .await
        .unwrap_err();

    match err {
        OperationError::Remote { method, error } => {
            assert_eq!(method, "createProject");
            assert_eq!(error.message, "Project name already taken");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
    assert_eq!(received_calls(&server).await.len(), 1);
}

#[tokio::test]
async fn membership_error_is_only_a_warning() {
    let server = MockServer::start().await;
    mount_method(&server, "createProject", rpc_result(json!(5)), 1).await;
    mount_method(
        &server,
        "addProjectUser",
        rpc_error(-32000, "User already member"),
        1,
    )
    .await;
    mount_method(&server, "getProjectById", rpc_result(project_details(5)), 1).await;

    let report = create_project_with_owner(&client_for(&server), &new_project())
        .await
        .unwrap();

    assert_eq!(
        report.membership,
        Advisory::Failed("User already member".to_string())
    );
    assert_eq!(report.details["id"], 5);
}

#[tokio::test]
async fn creation_without_id_is_fatal() {
    let server = MockServer::start().await;
    mount_method(&server, "createProject", rpc_result(json!(false)), 1).await;
    mount_method(&server, "addProjectUser", rpc_result(json!(true)), 0).await;
    mount_method(&server, "getProjectById", rpc_result(project_details(1)), 0).await;

    let err = create_project_with_owner(&client_for(&server), &new_project())
        .await
        .unwrap_err();
    assert!(
        matches!(err, OperationError::MissingId { method: "createProject" }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn fetch_error_is_fatal_after_creation() {
    let server = MockServer::start().await;
    mount_method(&server, "createProject", rpc_result(json!(9)), 1).await;
    mount_method(&server, "addProjectUser", rpc_result(json!(true)), 1).await;
    mount_method(
        &server,
        "getProjectById",
        rpc_error(-32000, "Project not found"),
        1,
    )
    .await;

    let err = create_project_with_owner(&client_for(&server), &new_project())
        .await
        .unwrap_err();

    assert!(
        matches!(err, OperationError::Remote { method: "getProjectById", .. }),
        "got {err:?}"
    );
    assert_eq!(received_calls(&server).await.len(), 3);
}
