//! Domain DTOs for the todo/user API.
//!
//! # Design
//! Both entities are server-owned; the client only holds read-through copies.
//! Mutation endpoints of the real backend answer with an acknowledgement
//! subset of the record, so fields the client never supplies itself default
//! when absent instead of failing the parse.

use serde::{Deserialize, Deserializer, Serialize};

/// A todo item as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    pub task: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: String,
}

/// A user as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: String,
}

/// Request payload for `POST /todos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub user_id: i64,
    pub task: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for `PUT /todos/{id}`. The backend replaces both fields,
/// so both are always sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    pub task: String,
    pub completed: bool,
}

/// Request payload for `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

/// SQL `SUM` over no rows yields `null`; read it as zero.
fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

/// Aggregate counters from `GET /stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total: i64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub completed: i64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub pending: i64,
}

/// Per-user counters from `GET /stats/users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_todos: i64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub completed_todos: i64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub pending_todos: i64,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
