//! JSON-RPC 2.0 wire types for the Kanboard API.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// Kanboard method names used by the compound operations.
pub mod methods {
    pub const CREATE_PROJECT: &str = "createProject";
    pub const ADD_PROJECT_USER: &str = "addProjectUser";
    pub const GET_PROJECT_BY_ID: &str = "getProjectById";
    pub const CREATE_TASK: &str = "createTask";
    pub const UPDATE_TASK: &str = "updateTask";
    pub const GET_TASK: &str = "getTask";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    /// Correlation id only; the response id is never checked against it.
    pub id: i64,
    pub params: Value,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, id: i64, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            id,
            params,
        }
    }

    /// Equality ignoring the time-derived id.
    pub fn same_call(&self, other: &RpcRequest) -> bool {
        self.jsonrpc == other.jsonrpc && self.method == other.method && self.params == other.params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl fmt::Display for RpcErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// Response envelope: `result` on success XOR `error` on failure.
///
/// An absent `result` deserializes as `null`. The body as received is kept
/// in [`RpcResponse::raw`] for callers that print it verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
    #[serde(skip)]
    raw: Value,
}

impl RpcResponse {
    /// Decode an envelope from an already-parsed JSON body.
    pub fn from_raw(raw: Value) -> serde_json::Result<Self> {
        let mut response = Self::deserialize(&raw)?;
        response.raw = raw;
        Ok(response)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The JSON body exactly as the server sent it.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Error wins when a misbehaving server sends both fields.
    pub fn into_result(self) -> Result<Value, RpcErrorObject> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.result),
        }
    }
}

/// Outcome of a creation call that did not return an `error`.
///
/// Kanboard sometimes accepts a create request but reports `false` instead of
/// an id (for instance when an inline owner assignment is refused). That case
/// is kept apart from real ids so an id of `0` is never read as "no id".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatedId {
    Created(i64),
    AcceptedNoId,
}

impl CreatedId {
    pub fn from_result(result: &Value) -> Self {
        match result {
            Value::Number(n) => n.as_i64().map_or(Self::AcceptedNoId, Self::Created),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map_or(Self::AcceptedNoId, Self::Created),
            _ => Self::AcceptedNoId,
        }
    }

    pub fn id(self) -> Option<i64> {
        match self {
            Self::Created(id) => Some(id),
            Self::AcceptedNoId => None,
        }
    }
}

/// Loose truthiness used for boolean-ish API results such as `updateTask`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
