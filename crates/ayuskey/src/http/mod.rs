//! HTTP transport abstraction
//!
//! The client performs all byte transfer through the [`Transport`] trait,
//! which mirrors the fetch contract: a URL plus a [`RequestInit`] in, a
//! status-and-body [`TransportReply`] out. [`FetchTransport`] is the
//! reqwest-backed default; tests and embedders substitute their own.

pub use fetch::FetchTransport;
pub use reply::TransportReply;
pub use transport::{CachePolicy, CredentialsPolicy, RequestInit, Transport};

mod fetch;
mod reply;
mod transport;

// Re-export HTTP types from the http crate for convenience
pub use http::{Method, StatusCode};
