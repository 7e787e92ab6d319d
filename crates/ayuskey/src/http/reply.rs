//! The transport's response envelope

use crate::error::{Error, Result};
use bytes::Bytes;
use http::StatusCode;
use serde::de::DeserializeOwned;

/// Status and raw body of a completed exchange.
///
/// The body is kept as bytes and parsed lazily through [`json`](Self::json),
/// so replies whose status makes the body irrelevant (204) never touch a
/// JSON parser.
#[derive(Debug, Clone)]
pub struct TransportReply {
    status: StatusCode,
    body: Bytes,
}

impl TransportReply {
    /// Build a reply from a status and body.
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// [`Error::Decode`] if the body is not valid JSON or does not match
    /// `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::Decode)
    }
}
