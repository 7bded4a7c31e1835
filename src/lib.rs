//! # MonkeyDB Core
//!
//! Database access and catalog layer for a local SQLite folder manager.
//!
//! ## Features
//!
//! - Local user accounts with Argon2 password hashing
//! - Raw SQL execution against any database file in a folder
//! - Folder catalog of database files and their tables
//! - Create / drop table / delete database lifecycle operations
//! - JSON export of result sets
//! - Natural language to SQL through a pluggable text generator
//!
//! ## Example
//!
//! ```no_run
//! use monkeydb::{AppConfig, CredentialStore, VerifyResult, Workspace};
//! use std::path::Path;
//!
//! let config = AppConfig::load_default().unwrap();
//! let store = CredentialStore::from_config(&config).unwrap();
//! store.initialize().unwrap();
//!
//! if let VerifyResult::Authenticated(user) = store.verify("marco", "secret").unwrap() {
//!     let workspace = Workspace::new(&user.username, Path::new("/data/dbs"), &config);
//!     for db in workspace.catalog().databases() {
//!         println!("{}: {:?}", db.name, db.tables);
//!     }
//! }
//! ```

pub mod business;
pub mod config;
pub mod crypto;
pub mod database;
pub mod error;
pub mod export;
pub mod utils;

// Re-export main types
pub use business::{
    CatalogScanner, CredentialStore, DatabaseLifecycle, ExportOutcome, GeneratorError,
    HistoryEntry, QueryEngine, Selection, Status, StatusKind, TextGenerator, Workspace,
};
pub use config::AppConfig;
pub use database::models::{
    Catalog, CellValue, DatabaseEntry, QueryResult, TableCatalogEntry, User, UserRecord,
    VerifyResult,
};
pub use error::{ErrorKind, ManagerError, Result};

/// Application name, used for per-user data and config directories
pub const APP_NAME: &str = "MonkeyDB";

/// Credential database filename
pub const USERS_DB_FILENAME: &str = "Users.db";

/// Recognized database file extension (without the dot)
pub const DATABASE_EXTENSION: &str = "db";

/// Prompt prefix sent to the NL to SQL model
pub const TRANSLATION_PROMPT_PREFIX: &str = "Translate from English to SQL: ";
