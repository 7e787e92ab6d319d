//! reqwest-backed default transport

use crate::error::{Error, Result};
use crate::http::{CachePolicy, RequestInit, Transport, TransportReply};
use async_trait::async_trait;
use http::header::{CACHE_CONTROL, CONTENT_TYPE};
use std::time::Duration;

/// The ambient HTTP transport, built on `reqwest`.
///
/// Used by every client that is not handed an explicit transport. Bodies are
/// sent as `application/json`; `CachePolicy::NoCache` becomes a
/// `Cache-Control: no-cache` header; cookies are never attached because the
/// underlying client carries no cookie store. Timeouts live here, not in the
/// dispatcher, and there is no retry logic.
#[derive(Debug, Clone)]
pub struct FetchTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl FetchTransport {
    /// Build a transport with the given request timeout and user agent.
    ///
    /// # Errors
    ///
    /// [`Error::HttpClient`] if the underlying client cannot be constructed.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Wrap an existing `reqwest::Client`.
    ///
    /// The caller keeps responsibility for the client's timeout; `timeout`
    /// here is only used to label [`Error::Timeout`] values.
    pub fn from_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl Transport for FetchTransport {
    async fn fetch(&self, url: &str, init: RequestInit) -> Result<TransportReply> {
        let mut request = self.client.request(init.method, url);

        if init.cache == CachePolicy::NoCache {
            request = request.header(CACHE_CONTROL, "no-cache");
        }
        // CredentialsPolicy::Omit needs no action: the client has no cookie
        // store, so nothing could be attached.

        if let Some(body) = init.body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout(self.timeout)
            } else {
                Error::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        Ok(TransportReply::new(status, body))
    }
}
