//! Error types for the API client.
//!
//! # Design
//! Two failure families reach callers: the request never got a response
//! (`Transport`) or the server answered with a non-2xx status (`Server`).
//! The backend reports problems as `{"detail": ...}`; when that field is
//! present it is extracted so it can be shown to the operator verbatim.

use serde::Deserialize;
use thiserror::Error;

/// Errors returned by `ApiClient` parse methods and `Transport` implementations.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No response was obtained: connection refused, DNS failure, reset.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {}", reason(.detail, .body))]
    Server {
        status: u16,
        detail: Option<String>,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Build a `Server` error from a status and raw body, extracting `detail`.
    pub fn server(status: u16, body: String) -> Self {
        ApiError::Server {
            status,
            detail: extract_detail(&body),
            body,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Server { status: 404, .. })
    }

    /// Server-provided detail when present, otherwise the adapter-level message.
    pub fn message(&self) -> String {
        match self {
            ApiError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            other => other.to_string(),
        }
    }
}

fn reason<'a>(detail: &'a Option<String>, body: &'a str) -> &'a str {
    detail.as_deref().unwrap_or(body)
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Pull the human-readable reason out of a `{"detail": ...}` body.
///
/// A string detail is returned as-is. Validation failures arrive as a list of
/// objects with a `msg` field; those messages are joined with `; `.
fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}
