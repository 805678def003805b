//! Database backends.
//!
//! Only SQLite is provided. It runs the rendered queries against a legacy
//! schema and implements the collaborator traits from the same database.

#[cfg(feature = "sqlite")]
pub mod sqlite;
