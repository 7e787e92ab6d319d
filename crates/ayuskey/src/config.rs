//! Configuration for the Ayuskey client

use crate::credential::Credential;
use std::time::Duration;

/// Default request timeout for the bundled transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for constructing a [`Client`](crate::Client).
///
/// Most callers use [`Client::builder`](crate::Client::builder) directly;
/// this struct exists for programs that assemble configuration elsewhere
/// (files, environment) before building the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin of the server, e.g. `https://kr.akirin.xyz`. No trailing
    /// `/api` — the client appends that itself.
    pub origin: Option<String>,

    /// Default credential sent as the envelope's `i` field.
    pub credential: Credential,

    /// Request timeout for the bundled transport.
    pub timeout: Duration,

    /// User agent for the bundled transport; `None` uses the crate default.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: None,
            credential: Credential::Absent,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given origin.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: Some(origin.into()),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads:
    /// - `AYUSKEY_ORIGIN` for the server origin
    /// - `AYUSKEY_API_TOKEN` for the default credential
    /// - `AYUSKEY_TIMEOUT` for the request timeout in seconds
    ///
    /// Unset or unparseable variables leave the corresponding default in
    /// place.
    pub fn from_env() -> Self {
        use std::env;

        let mut config = Self::default();

        if let Ok(origin) = env::var("AYUSKEY_ORIGIN") {
            config.origin = Some(origin);
        }

        if let Ok(token) = env::var("AYUSKEY_API_TOKEN") {
            config.credential = Credential::token(token);
        }

        if let Ok(timeout_str) = env::var("AYUSKEY_TIMEOUT")
            && let Ok(timeout_secs) = timeout_str.parse::<u64>()
        {
            config.timeout = Duration::from_secs(timeout_secs);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_credential() {
        let config = ClientConfig::default();
        assert!(config.origin.is_none());
        assert_eq!(config.credential, Credential::Absent);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn new_sets_the_origin() {
        let config = ClientConfig::new("https://example.tld");
        assert_eq!(config.origin.as_deref(), Some("https://example.tld"));
    }
}
