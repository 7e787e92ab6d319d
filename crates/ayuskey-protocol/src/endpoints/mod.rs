//! Concrete endpoint definitions
//!
//! A representative slice of the Ayuskey endpoint catalogue. Every endpoint
//! here is a marker type implementing [`crate::Endpoint`]; the wire names use
//! camelCase as the server expects.

pub mod meta;
pub mod notes;
pub mod users;

pub use meta::Meta;
pub use notes::{NotesCreate, NotesDelete, NotesShow};
pub use users::{CurrentAccount, UsersShow};
