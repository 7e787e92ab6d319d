//! # ayuskey
//!
//! Typed client for the JSON-over-HTTP API of Ayuskey (Misskey-family)
//! servers. Every call is a POST to `{origin}/api/{endpoint}` whose body is
//! the caller's parameters plus the reserved credential field `i`; replies
//! are classified into success (200), empty (204), or a structured
//! [`ApiError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ayuskey::Client;
//! use ayuskey::protocol::endpoints::notes::{NotesCreate, NotesCreateRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder()
//!         .origin("https://kr.akirin.xyz")
//!         .token("YOUR_API_TOKEN")
//!         .build()?;
//!
//!     let reply = client
//!         .call::<NotesCreate>(&NotesCreateRequest::text("hello fediverse"))
//!         .await?;
//!
//!     println!("posted note {}", reply.created_note.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Error discrimination
//!
//! Server-reported failures and transport failures stay distinct:
//!
//! ```rust,no_run
//! # use ayuskey::Client;
//! # async fn example(client: Client) {
//! # let params = ayuskey::protocol::endpoints::users::UsersShowRequest::by_id("x");
//! match client.call::<ayuskey::protocol::endpoints::users::UsersShow>(&params).await {
//!     Ok(reply) => { /* ... */ }
//!     Err(err) if err.is_api_error() => {
//!         let api = err.as_api_error().unwrap();
//!         eprintln!("server said {}: {}", api.code, api.message);
//!     }
//!     Err(err) => eprintln!("transport failed: {err}"),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use credential::{Auth, Credential};
pub use error::{ApiError, Error, ErrorKind, Result};
pub use self::http::{FetchTransport, Transport};

// Module declarations
pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod http;

/// The schema-time half of the client: endpoint and wire types.
pub use ayuskey_protocol as protocol;
pub use ayuskey_protocol::{Endpoint, NoParams};

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }
}
