//! Business logic layer for MonkeyDB
//!
//! Component APIs over the database layer, and the [`Workspace`] that
//! composes them for the GUI.

pub mod credentials;
pub mod engine;
pub mod catalog;
pub mod lifecycle;
pub mod status;
pub mod translate;
pub mod workspace;

pub use credentials::CredentialStore;
pub use engine::QueryEngine;
pub use catalog::CatalogScanner;
pub use lifecycle::DatabaseLifecycle;
pub use status::{Status, StatusKind};
pub use translate::{GeneratorError, TextGenerator};
pub use workspace::{ExportOutcome, HistoryEntry, Selection, Workspace};
