use serde_json::Value;
use serde_json::json;

use super::Advisory;
use super::Result;
use super::call_create_required;
use super::call_required;
use crate::client::KanboardClient;
use crate::protocol::methods;

/// Role granted to the owner after the project exists.
pub const PROJECT_MANAGER_ROLE: &str = "project-manager";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub owner_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectReport {
    pub project_id: i64,
    /// `addProjectUser` outcome; the owner may already be a member.
    pub membership: Advisory,
    /// `getProjectById` result.
    pub details: Value,
}

impl ProjectReport {
    pub fn board_url(&self) -> Option<&str> {
        self.details.pointer("/url/board").and_then(Value::as_str)
    }

    pub fn list_url(&self) -> Option<&str> {
        self.details.pointer("/url/list").and_then(Value::as_str)
    }
}

/// createProject → addProjectUser (advisory) → getProjectById.
///
/// Only the creation and the final fetch are fatal.
pub async fn create_project_with_owner(
    client: &KanboardClient,
    project: &NewProject,
) -> Result<ProjectReport> {
    tracing::info!(name = %project.name, "creating project");
    let project_id = call_create_required(
        client,
        methods::CREATE_PROJECT,
        json!({
            "name": project.name,
            "description": project.description,
            "owner_id": project.owner_id,
        }),
    )
    .await?;
    tracing::info!(project_id, "project created");

    let membership = match client
        .call(
            methods::ADD_PROJECT_USER,
            json!({
                "project_id": project_id,
                "user_id": project.owner_id,
                "role": PROJECT_MANAGER_ROLE,
            }),
        )
        .await?
        .into_result()
    {
        Ok(_) => Advisory::Done,
        Err(error) => {
            tracing::warn!(project_id, "could not add owner to project: {error}");
            Advisory::Failed(error.message)
        }
    };

    let details = call_required(
        client,
        methods::GET_PROJECT_BY_ID,
        json!({ "project_id": project_id }),
    )
    .await?;

    Ok(ProjectReport {
        project_id,
        membership,
        details,
    })
}
