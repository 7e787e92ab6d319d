//! The error payload servers attach to non-success responses
//!
//! Any status outside `{200, 204}` carries a JSON body shaped
//! `{"error": {"id": ..., "code": ..., "message": ..., "kind": ..., "info": ...}}`.
//! All fields are server-authored and therefore untrusted: every one
//! deserializes with a default, so a missing or malformed `error` member
//! still produces an [`ApiError`] the caller can recognize.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fault attribution for an API error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// The request was at fault (bad parameters, auth failure, etc.).
    Client,

    /// The server failed internally.
    Server,

    /// The server sent a kind this client does not know.
    #[default]
    #[serde(other)]
    Unknown,
}

/// A structured error returned by the API on a non-success status.
///
/// Field contents are untrusted server output; recognition of the error
/// class never depends on them (the `ayuskey` crate wraps this in a
/// dedicated error variant instead).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    /// Server-assigned trace identifier.
    #[serde(default)]
    pub id: String,

    /// Stable machine-readable error tag, e.g. `NO_SUCH_USER`.
    #[serde(default)]
    pub code: String,

    /// Human-readable message, server-authored.
    #[serde(default)]
    pub message: String,

    /// Whether the fault lies with the caller or the server.
    #[serde(default)]
    pub kind: ErrorKind,

    /// Free-form details attached by the server.
    #[serde(default)]
    pub info: serde_json::Map<String, Value>,
}

impl ApiError {
    /// Extract the error payload from a parsed response body.
    ///
    /// Takes the object at `body.error`; a missing or malformed member
    /// yields a default-valued error so the caller can still discriminate
    /// the failure class.
    pub fn from_response_body(body: &Value) -> Self {
        body.get("error")
            .and_then(|e| serde_json::from_value(e.clone()).ok())
            .unwrap_or_default()
    }
}
