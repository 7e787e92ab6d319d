//! Error types for the Ayuskey client
//!
//! Two error classes matter to callers. **Protocol-level** failures — any
//! HTTP status outside `{200, 204}` — become [`Error::Api`], carrying the
//! server's structured payload. **Transport/parse-level** failures —
//! connection errors, timeouts, malformed JSON — keep their own variants and
//! are never dressed up as API errors. The `Api` variant is a dedicated
//! constructor, so recognition via [`Error::is_api_error`] cannot be forged
//! by server-controlled field values.

use std::time::Duration;
use thiserror::Error;

pub use ayuskey_protocol::{ApiError, ErrorKind};

/// Result type alias for operations that can fail with a client error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Ayuskey client.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a non-success status and a structured
    /// error payload.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Network or connection failure reported by the transport.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The transport gave up waiting for the server.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// A response body could not be parsed as JSON, or parsed JSON did not
    /// match the endpoint's response type.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// Request parameters could not be serialized to JSON.
    #[error("Failed to serialize request parameters: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The request was malformed before it reached the wire, e.g.
    /// parameters that do not serialize to a JSON object.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid origin URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Escape hatch for custom [`Transport`](crate::http::Transport)
    /// implementations; propagated verbatim through the dispatcher.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// True iff this error was produced by the non-success branch of the
    /// dispatcher, i.e. it carries a server error payload.
    ///
    /// Transport failures, timeouts and parse errors all return false, no
    /// matter what their messages contain.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api(_))
    }

    /// The server error payload, if this is an API error.
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(api) => Some(api),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_variant_is_recognized() {
        let err = Error::Api(ApiError {
            code: "INVALID".into(),
            ..Default::default()
        });
        assert!(err.is_api_error());
        assert_eq!(err.as_api_error().unwrap().code, "INVALID");
    }

    #[test]
    fn transport_variants_are_not_api_errors() {
        assert!(!Error::Connection("refused".into()).is_api_error());
        assert!(!Error::Timeout(Duration::from_secs(1)).is_api_error());
        assert!(!Error::Other(anyhow::anyhow!("boom")).is_api_error());
        assert!(Error::Connection("refused".into()).as_api_error().is_none());
    }

    #[test]
    fn forged_fields_do_not_make_an_api_error() {
        // A transport error whose message mimics an API payload still is
        // not recognized; discrimination is by variant, not content.
        let err = Error::Connection(r#"{"kind":"client","code":"INVALID"}"#.into());
        assert!(!err.is_api_error());
    }

    #[test]
    fn decode_errors_keep_their_source() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = Error::Decode(source);
        assert!(err.to_string().contains("decode"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
