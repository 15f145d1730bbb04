//! Compound operations: several RPC calls realizing one user-facing action.
//!
//! Each step is either load-bearing (an error aborts with [`OperationError`])
//! or advisory (the failure is recorded as an [`Advisory`] and the operation
//! continues). No step is retried except the single create-task fallback.

mod project;
mod task;

pub use project::NewProject;
pub use project::PROJECT_MANAGER_ROLE;
pub use project::ProjectReport;
pub use project::create_project_with_owner;
pub use task::Assignment;
pub use task::DEFAULT_TASK_COLOR;
pub use task::NewTask;
pub use task::TASK_COLORS;
pub use task::TaskReport;
pub use task::create_task_with_owner;

use serde_json::Value;
use thiserror::Error;

use crate::client::ClientError;
use crate::client::KanboardClient;
use crate::protocol::CreatedId;
use crate::protocol::RpcErrorObject;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("{method} failed: {error}")]
    Remote {
        method: &'static str,
        error: RpcErrorObject,
    },

    #[error("{method} was accepted but returned no identifier")]
    MissingId { method: &'static str },
}

pub type Result<T> = std::result::Result<T, OperationError>;

/// Outcome of a step whose failure does not abort the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    Done,
    Failed(String),
}

impl Advisory {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Call `method`; an error envelope is fatal.
async fn call_required(
    client: &KanboardClient,
    method: &'static str,
    params: Value,
) -> Result<Value> {
    client
        .call(method, params)
        .await?
        .into_result()
        .map_err(|error| OperationError::Remote { method, error })
}

/// Call a creation method; an error envelope is fatal, a missing id is not.
async fn call_create(
    client: &KanboardClient,
    method: &'static str,
    params: Value,
) -> Result<CreatedId> {
    let result = call_required(client, method, params).await?;
    Ok(CreatedId::from_result(&result))
}

/// Call a creation method where an id is mandatory.
async fn call_create_required(
    client: &KanboardClient,
    method: &'static str,
    params: Value,
) -> Result<i64> {
    call_create(client, method, params)
        .await?
        .id()
        .ok_or(OperationError::MissingId { method })
}
