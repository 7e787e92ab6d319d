//! The endpoint descriptor trait
//!
//! An [`Endpoint`] pairs a server-side handler name with the request type it
//! accepts and the response type it yields. The runtime client is generic
//! over this trait; it never inspects the types beyond serializing one and
//! deserializing the other, so adding an endpoint is a type-level change
//! with no runtime counterpart.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A named API endpoint with typed request and response shapes.
///
/// Implementors are zero-sized marker types; the interesting parts are the
/// associated types. Endpoints that reply `204 No Content` use `()` as their
/// response, which deserializes from JSON `null`.
///
/// # Example
///
/// ```
/// use ayuskey_protocol::Endpoint;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize)]
/// struct PingRequest {}
///
/// #[derive(Deserialize)]
/// struct Pong {
///     pong: i64,
/// }
///
/// struct Ping;
///
/// impl Endpoint for Ping {
///     const NAME: &'static str = "ping";
///     type Request = PingRequest;
///     type Response = Pong;
/// }
/// ```
pub trait Endpoint {
    /// The endpoint name as it appears under `/api/`, verbatim.
    const NAME: &'static str;

    /// The parameter object posted to the endpoint.
    ///
    /// Must serialize to a JSON object (or nothing at all, like [`NoParams`]);
    /// the client merges the reserved `i` credential field into it.
    type Request: Serialize + Send + Sync;

    /// The parsed response body.
    ///
    /// For endpoints whose shape depends on the request, this is a sum type
    /// the caller matches on; see `endpoints::users::UserOrUsers`.
    type Response: DeserializeOwned;
}

/// Request type for endpoints that take no parameters.
///
/// Serializes to the empty JSON object, so the posted envelope contains only
/// the reserved `i` field.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoParams {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_params_serializes_to_empty_object() {
        let json = serde_json::to_value(NoParams {}).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
