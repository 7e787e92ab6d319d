//! Wire types and endpoint definitions for the Ayuskey API
//!
//! This crate holds the schema-time half of the client: the [`Endpoint`]
//! trait that names an endpoint and binds its request/response types, the
//! [`ApiError`] payload servers attach to non-success responses, and a
//! catalogue of concrete endpoint definitions under [`endpoints`].
//!
//! # Design Principles
//!
//! - **Zero I/O**: everything here is pure data; the runtime client lives in
//!   the `ayuskey` crate.
//! - **Untrusted input**: every server-authored field deserializes with a
//!   default so a malformed body still yields a usable value.
//! - **Switched responses**: endpoints whose response shape depends on the
//!   request (e.g. `users/show`) expose a sum type the caller matches on.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod endpoint;
pub mod endpoints;
pub mod error;

pub use endpoint::{Endpoint, NoParams};
pub use error::{ApiError, ErrorKind};
