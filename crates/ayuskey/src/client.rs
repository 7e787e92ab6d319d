//! Main client implementation for the Ayuskey API

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use bytes::Bytes;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::{
    config::{ClientConfig, DEFAULT_TIMEOUT},
    credential::{Auth, Credential},
    error::{Error, Result},
    http::{FetchTransport, RequestInit, Transport},
};
use ayuskey_protocol::{ApiError, Endpoint};

/// Client for an Ayuskey server.
///
/// Holds the server origin, the default credential, and the transport; all
/// API calls go through [`call`](Client::call) or
/// [`request_raw`](Client::request_raw), which POST a JSON envelope to
/// `{origin}/api/{endpoint}` and classify the reply.
///
/// Cloning is cheap; clones share the transport and the pending-request
/// counter.
///
/// # Example
///
/// ```rust,no_run
/// use ayuskey::Client;
///
/// let client = Client::builder()
///     .origin("https://kr.akirin.xyz")
///     .token("TOKEN")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

// Manual impl so the credential never ends up in logs.
impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("origin", &self.inner.origin)
            .field("pending", &self.pending_requests())
            .finish_non_exhaustive()
    }
}

struct ClientInner {
    /// Absolute URL prefix, normalized without a trailing slash.
    origin: String,

    /// Default credential stamped into every envelope.
    credential: Credential,

    /// Byte-transfer layer; `FetchTransport` unless the builder was handed
    /// something else.
    transport: Arc<dyn Transport>,

    /// Number of requests that have entered but not yet settled.
    pending: AtomicUsize,
}

/// Decrements the pending counter exactly once, on every terminal path of a
/// dispatched request, including futures dropped before completion or even
/// before their first poll.
struct PendingGuard(Arc<ClientInner>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.pending.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Client {
    /// Create an unauthenticated client for the given origin.
    ///
    /// # Panics
    ///
    /// Panics if the origin is not a valid http(s) URL. Use
    /// [`Client::try_new`] for fallible construction.
    pub fn new(origin: impl Into<String>) -> Self {
        Self::try_new(origin).expect("failed to build client for the provided origin")
    }

    /// Create an unauthenticated client for the given origin (fallible
    /// version).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] for a malformed origin and
    /// [`Error::HttpClient`] if the default transport cannot be built.
    pub fn try_new(origin: impl Into<String>) -> Result<Self> {
        Self::builder().origin(origin).build()
    }

    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ClientBuilder::build`].
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Self::builder().credential(config.credential);
        if let Some(origin) = config.origin {
            builder = builder.origin(origin);
        }
        if let Some(user_agent) = config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        builder.timeout(config.timeout).build()
    }

    /// The normalized server origin.
    pub fn origin(&self) -> &str {
        &self.inner.origin
    }

    /// Number of requests that have entered the dispatcher but not yet
    /// settled. Zero means quiescence: every previously initiated call has
    /// terminated from the client's perspective.
    pub fn pending_requests(&self) -> usize {
        self.inner.pending.load(Ordering::SeqCst)
    }

    /// Call a typed endpoint with the client's default credential.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] for non-success statuses; transport and decode
    /// failures keep their own variants (see [`Error::is_api_error`]).
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use ayuskey::Client;
    /// use ayuskey::protocol::endpoints::users::{UserOrUsers, UsersShow, UsersShowRequest};
    ///
    /// # async fn example(client: Client) -> ayuskey::Result<()> {
    /// let reply = client
    ///     .call::<UsersShow>(&UsersShowRequest::by_id("8pgp30wngf"))
    ///     .await?;
    /// if let UserOrUsers::One(user) = reply {
    ///     println!("{}", user.username);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn call<E: Endpoint>(
        &self,
        params: &E::Request,
    ) -> impl Future<Output = Result<E::Response>> + Send + use<E> {
        self.call_with::<E>(params, Auth::Inherit)
    }

    /// Call a typed endpoint with a per-call credential override.
    pub fn call_with<E: Endpoint>(
        &self,
        params: &E::Request,
        auth: Auth,
    ) -> impl Future<Output = Result<E::Response>> + Send + use<E> {
        let raw = self.dispatch(E::NAME.to_owned(), serde_json::to_value(params), auth);
        async move {
            let value = raw.await?;
            serde_json::from_value(value).map_err(Error::Decode)
        }
    }

    /// Call an endpoint by name with untyped parameters.
    ///
    /// This is the dispatcher itself: the response is whatever JSON the
    /// server sent (or `Value::Null` for a 204). `params` must be a JSON
    /// object or `Value::Null`.
    pub fn request_raw(
        &self,
        endpoint: &str,
        params: Value,
        auth: Auth,
    ) -> impl Future<Output = Result<Value>> + Send + use<> {
        self.dispatch(endpoint.to_owned(), Ok(params), auth)
    }

    /// The request dispatcher.
    ///
    /// The pending counter is incremented here, in the synchronous prefix,
    /// so it is observable as soon as the future is handed back; the guard
    /// inside the future decrements it exactly once when the call settles
    /// (or the future is dropped).
    fn dispatch(
        &self,
        endpoint: String,
        params: serde_json::Result<Value>,
        auth: Auth,
    ) -> impl Future<Output = Result<Value>> + Send + use<> {
        let inner = Arc::clone(&self.inner);
        inner.pending.fetch_add(1, Ordering::SeqCst);
        let pending = PendingGuard(Arc::clone(&inner));

        let url = format!("{}/api/{}", inner.origin, endpoint);
        let credential = auth.resolve(&inner.credential);

        async move {
            let _pending = pending;

            let params = params.map_err(Error::Serialization)?;
            let envelope = compose_envelope(params, &credential)?;

            debug!(endpoint = %endpoint, "dispatching api request");
            let started = Instant::now();

            let reply = match inner.transport.fetch(&url, RequestInit::post(envelope)).await {
                Ok(reply) => reply,
                Err(err) => {
                    warn!(
                        endpoint = %endpoint,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        error = %err,
                        "transport failed"
                    );
                    return Err(err);
                }
            };

            let status = reply.status();
            let outcome = match status.as_u16() {
                200 => reply.json::<Value>(),
                // 204 resolves null and never parses a body, even if the
                // server sent one.
                204 => Ok(Value::Null),
                _ => {
                    let body: Value = reply.json()?;
                    Err(Error::Api(ApiError::from_response_body(&body)))
                }
            };

            match &outcome {
                Ok(_) => debug!(
                    endpoint = %endpoint,
                    status = status.as_u16(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "api request completed"
                ),
                Err(err) => warn!(
                    endpoint = %endpoint,
                    status = status.as_u16(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %err,
                    "api request failed"
                ),
            }

            outcome
        }
    }
}

/// Merge the parameter object with the reserved `i` field.
///
/// `Value::Null` (unit params) counts as the empty object. Anything that is
/// neither an object nor null cannot carry the credential and is rejected
/// before touching the wire.
fn compose_envelope(params: Value, credential: &Credential) -> Result<Bytes> {
    let mut envelope = match params {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(Error::InvalidRequest(format!(
                "parameters must serialize to a JSON object, got {}",
                json_type_name(&other)
            )));
        }
    };

    credential.stamp(&mut envelope);

    let bytes = serde_json::to_vec(&Value::Object(envelope)).map_err(Error::Serialization)?;
    Ok(Bytes::from(bytes))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Builder for creating a configured [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    origin: Option<String>,
    credential: Credential,
    transport: Option<Arc<dyn Transport>>,
    timeout: Option<std::time::Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Set the server origin, e.g. `https://kr.akirin.xyz`.
    ///
    /// The origin is the bare server URL; the builder trims a trailing
    /// slash, and the client appends `/api/{endpoint}` per call.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set the default credential.
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = credential;
        self
    }

    /// Authenticate every request with this API token.
    pub fn token(self, token: impl Into<String>) -> Self {
        self.credential(Credential::token(token))
    }

    /// Send `i: null` by default: explicitly unauthenticated, as opposed to
    /// leaving the credential out entirely.
    pub fn anonymous(self) -> Self {
        self.credential(Credential::Anonymous)
    }

    /// Use a custom transport instead of the bundled reqwest one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Request timeout for the bundled transport. Ignored when a custom
    /// transport is supplied.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// User agent for the bundled transport. Ignored when a custom
    /// transport is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUrl`] when the origin is missing, empty, unparseable,
    /// or not http(s); [`Error::HttpClient`] when the bundled transport
    /// cannot be constructed.
    pub fn build(self) -> Result<Client> {
        let origin = self
            .origin
            .ok_or_else(|| Error::InvalidUrl("origin is required".to_string()))?;
        let origin = normalize_origin(&origin)?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
                let user_agent = self
                    .user_agent
                    .unwrap_or_else(|| format!("ayuskey-rs/{}", crate::VERSION));
                Arc::new(FetchTransport::new(timeout, &user_agent)?) as Arc<dyn Transport>
            }
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                origin,
                credential: self.credential,
                transport,
                pending: AtomicUsize::new(0),
            }),
        })
    }
}

fn normalize_origin(origin: &str) -> Result<String> {
    let trimmed = origin.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidUrl("origin cannot be empty".to_string()));
    }

    let url: Url = trimmed
        .parse()
        .map_err(|e| Error::InvalidUrl(format!("{trimmed}: {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(Error::InvalidUrl(format!(
                "invalid URL scheme '{scheme}', only 'http' and 'https' are supported"
            )));
        }
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
