use serde_json::Value;
use serde_json::json;

use super::Result;
use super::call_create;
use super::call_create_required;
use super::call_required;
use crate::client::KanboardClient;
use crate::protocol::CreatedId;
use crate::protocol::is_truthy;
use crate::protocol::methods;

/// Color ids accepted by Kanboard's `color_id`.
pub const TASK_COLORS: &[&str] = &[
    "yellow",
    "blue",
    "green",
    "purple",
    "red",
    "orange",
    "grey",
    "brown",
    "deep_orange",
    "dark_grey",
    "pink",
    "teal",
    "cyan",
    "lime",
    "light_green",
    "amber",
];

pub const DEFAULT_TASK_COLOR: &str = "blue";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub project_id: i64,
    pub title: String,
    pub description: String,
    pub color_id: String,
    pub owner_id: i64,
}

impl NewTask {
    fn create_params(&self, with_owner: bool) -> Value {
        let mut params = json!({
            "project_id": self.project_id,
            "title": self.title,
            "description": self.description,
            "color_id": self.color_id,
        });
        if with_owner {
            params["owner_id"] = json!(self.owner_id);
        }
        params
    }
}

/// How ownership ended up on the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// `owner_id` was accepted by the first `createTask`.
    AtCreation,
    /// Created without owner, then assigned via `updateTask`.
    Updated,
    /// Created without owner; `updateTask` did not go through.
    Unassigned(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskReport {
    pub task_id: i64,
    pub assignment: Assignment,
    /// `getTask` result.
    pub details: Value,
}

impl TaskReport {
    pub fn used_fallback(&self) -> bool {
        !matches!(self.assignment, Assignment::AtCreation)
    }

    pub fn url(&self) -> Option<&str> {
        self.details.get("url").and_then(Value::as_str)
    }
}

/// createTask (with owner) → [createTask (no owner) → updateTask] → getTask.
///
/// The bracketed fallback runs only when the first `createTask` is accepted
/// without an id. An error from either `createTask` is fatal; `updateTask` is
/// advisory.
pub async fn create_task_with_owner(client: &KanboardClient, task: &NewTask) -> Result<TaskReport> {
    tracing::info!(project_id = task.project_id, title = %task.title, "creating task");

    let (task_id, assignment) =
        match call_create(client, methods::CREATE_TASK, task.create_params(true)).await? {
            CreatedId::Created(task_id) => (task_id, Assignment::AtCreation),
            CreatedId::AcceptedNoId => {
                tracing::info!("createTask returned no id, retrying without owner_id");
                let task_id =
                    call_create_required(client, methods::CREATE_TASK, task.create_params(false))
                        .await?;
                let assignment = assign_owner(client, task_id, task.owner_id).await?;
                (task_id, assignment)
            }
        };

    let details = call_required(client, methods::GET_TASK, json!({ "task_id": task_id })).await?;

    Ok(TaskReport {
        task_id,
        assignment,
        details,
    })
}

async fn assign_owner(
    client: &KanboardClient,
    task_id: i64,
    owner_id: i64,
) -> Result<Assignment> {
    let response = client
        .call(
            methods::UPDATE_TASK,
            json!({ "id": task_id, "owner_id": owner_id }),
        )
        .await?;

    let assignment = match response.into_result() {
        Ok(result) if is_truthy(&result) => Assignment::Updated,
        Ok(result) => Assignment::Unassigned(format!("updateTask returned {result}")),
        Err(error) => Assignment::Unassigned(error.to_string()),
    };
    if let Assignment::Unassigned(reason) = &assignment {
        tracing::warn!(task_id, "task left unassigned: {reason}");
    }
    Ok(assignment)
}
