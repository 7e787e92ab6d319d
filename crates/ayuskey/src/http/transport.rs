//! The transport contract

use crate::error::Result;
use crate::http::TransportReply;
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use std::fmt;

/// Performs the HTTP exchange on behalf of the client.
///
/// The transport owns all network concerns: I/O, TLS, redirects, connection
/// reuse, and timeouts. The client composes the URL and body, hands them
/// over, and classifies the reply; it never retries and never inspects the
/// transport's failures beyond propagating them.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Execute one request and return the status-and-body envelope.
    ///
    /// # Errors
    ///
    /// Failures here are transport-level by definition and are surfaced to
    /// the caller unchanged; they are never converted into API errors.
    async fn fetch(&self, url: &str, init: RequestInit) -> Result<TransportReply>;
}

/// Whether cookies accompany the request.
///
/// The client always asks for [`Omit`](CredentialsPolicy::Omit);
/// authentication travels in the body's `i` field instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CredentialsPolicy {
    /// Never attach cookies.
    #[default]
    Omit,

    /// Attach cookies where the transport supports them.
    Include,
}

/// How the transport may interact with HTTP caches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Revalidate with the server on every request.
    #[default]
    NoCache,

    /// Whatever the transport would do on its own.
    Default,
}

/// Options for one transport exchange, shaped after the fetch `init`
/// dictionary.
#[derive(Debug, Clone, Default)]
pub struct RequestInit {
    /// HTTP method; defaults to GET.
    pub method: Method,

    /// Request body bytes, if any.
    pub body: Option<Bytes>,

    /// Cookie policy.
    pub credentials: CredentialsPolicy,

    /// Cache policy.
    pub cache: CachePolicy,
}

impl RequestInit {
    /// The init every dispatched request uses: POST with a JSON body,
    /// cookies omitted, caching disabled.
    pub fn post(body: impl Into<Bytes>) -> Self {
        Self {
            method: Method::POST,
            body: Some(body.into()),
            credentials: CredentialsPolicy::Omit,
            cache: CachePolicy::NoCache,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_init_is_a_bare_get() {
        let init = RequestInit::default();
        assert_eq!(init.method, Method::GET);
        assert!(init.body.is_none());
        assert_eq!(init.credentials, CredentialsPolicy::Omit);
        assert_eq!(init.cache, CachePolicy::NoCache);
    }

    #[test]
    fn post_init_carries_body_and_policies() {
        let init = RequestInit::post(&b"{}"[..]);
        assert_eq!(init.method, Method::POST);
        assert_eq!(init.body.as_deref(), Some(&b"{}"[..]));
        assert_eq!(init.credentials, CredentialsPolicy::Omit);
        assert_eq!(init.cache, CachePolicy::NoCache);
    }
}
