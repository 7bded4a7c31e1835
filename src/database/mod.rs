//! Database layer for MonkeyDB
//!
//! Handles SQLite access including:
//! - Scoped connection handles
//! - Credential schema creation
//! - Catalog introspection and raw statement execution

pub mod models;
pub mod schema;
pub mod connection;
pub mod queries;

pub use connection::{Database, OpenMode};
pub use models::*;
