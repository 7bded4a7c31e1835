//! Workspace API
//!
//! The composition root behind the workspace window: current folder,
//! selection, catalog, query editor, history and last result. GUI actions
//! call one method each; every method that changes the set of databases or
//! tables rescans before returning.

use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use crate::config::AppConfig;
use crate::database::{Catalog, QueryResult};
use crate::error::{ManagerError, Result};
use crate::export;
use crate::utils::{database_file_name, validate_database_name};
use super::catalog::CatalogScanner;
use super::engine::QueryEngine;
use super::lifecycle::DatabaseLifecycle;
use super::translate::{self, TextGenerator};

/// Currently selected database and table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub database: Option<PathBuf>,
    pub table: Option<String>,
}

/// One executed statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub executed_at: DateTime<Utc>,
    pub database: PathBuf,
    pub statement: String,
    pub succeeded: bool,
}

/// Result of an export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The save dialog was cancelled; nothing written
    Cancelled,
    Written(PathBuf),
}

/// Workspace state for one logged-in user
pub struct Workspace {
    /// Username shown in the title
    owner: String,
    /// Folder being browsed
    pub(crate) folder: PathBuf,
    pub(crate) selection: Selection,
    pub(crate) catalog: Catalog,
    /// Query editor contents
    pub(crate) editor: String,
    /// Executed statements, newest first
    pub(crate) history: Vec<HistoryEntry>,
    /// Result of the last successful statement
    pub(crate) last_result: Option<QueryResult>,
    scanner: CatalogScanner,
    engine: QueryEngine,
    lifecycle: DatabaseLifecycle,
    extension: String,
    export_pretty: bool,
}

impl Workspace {
    /// Open a workspace on `folder` and scan it
    pub fn new(owner: &str, folder: &Path, config: &AppConfig) -> Self {
        let scanner = CatalogScanner::new(&config.database_extension);
        let catalog = scanner.scan(folder);
        info!(owner, folder = %folder.display(), "workspace opened");

        Self {
            owner: owner.to_string(),
            folder: folder.to_path_buf(),
            selection: Selection::default(),
            catalog,
            editor: String::new(),
            history: Vec::new(),
            last_result: None,
            scanner,
            engine: QueryEngine::new(),
            lifecycle: DatabaseLifecycle::new(),
            extension: config.database_extension.clone(),
            export_pretty: config.export_pretty,
        }
    }

    /// Window title for this user
    pub fn title(&self) -> String {
        format!("{}'s Workspace", self.owner)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Executed statements, newest first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn last_result(&self) -> Option<&QueryResult> {
        self.last_result.as_ref()
    }

    // ------------------------------------------------------------------------
    // Folder and selection
    // ------------------------------------------------------------------------

    /// Switch to another folder and rescan it
    pub fn open_folder(&mut self, folder: &Path) {
        self.folder = folder.to_path_buf();
        self.rescan();
    }

    /// Replace the catalog with a fresh scan and re-validate the selection
    pub fn rescan(&mut self) {
        self.catalog = self.scanner.scan(&self.folder);

        let Some(db_path) = self.selection.database.clone() else {
            self.selection.table = None;
            return;
        };

        match self.catalog.database(&db_path) {
            None => {
                debug!(path = %db_path.display(), "selected database vanished, selection cleared");
                self.selection = Selection::default();
            }
            Some(entry) => {
                if let Some(table) = &self.selection.table
                    && !entry.has_table(table)
                {
                    debug!(table = %table, "selected table vanished, selection cleared");
                    self.selection.table = None;
                }
            }
        }
    }

    /// Select a database node
    pub fn select_database(&mut self, path: &Path) -> Result<()> {
        if !self.catalog.contains_database(path) {
            return Err(ManagerError::NotFound(path.display().to_string()));
        }
        self.selection = Selection {
            database: Some(path.to_path_buf()),
            table: None,
        };
        Ok(())
    }

    /// Select a table node under a database
    pub fn select_table(&mut self, database: &Path, table: &str) -> Result<()> {
        let entry = self
            .catalog
            .database(database)
            .ok_or_else(|| ManagerError::NotFound(database.display().to_string()))?;
        if !entry.has_table(table) {
            return Err(ManagerError::NotFound(format!("table {} in {}", table, entry.name)));
        }
        self.selection = Selection {
            database: Some(database.to_path_buf()),
            table: Some(table.to_string()),
        };
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::default();
    }

    // ------------------------------------------------------------------------
    // Query editor
    // ------------------------------------------------------------------------

    pub fn editor_text(&self) -> &str {
        &self.editor
    }

    pub fn set_editor_text(&mut self, text: &str) {
        self.editor = text.to_string();
    }

    pub fn clear_editor(&mut self) {
        self.editor.clear();
    }

    /// Execute the editor contents against the selected database
    pub fn execute_editor(&mut self) -> Result<QueryResult> {
        let statement = self.editor.clone();
        self.execute(&statement)
    }

    /// Execute a statement against the selected database
    ///
    /// Requires a database node to be selected. The statement is recorded
    /// in the history whether or not it succeeds, and the folder is
    /// rescanned afterwards since DDL may have changed it.
    pub fn execute(&mut self, statement: &str) -> Result<QueryResult> {
        let database = self.query_target()?;
        if statement.trim().is_empty() {
            return Err(ManagerError::InvalidInput("please insert an SQL query".to_string()));
        }

        let result = self.engine.execute(&database, statement);

        self.history.insert(0, HistoryEntry {
            executed_at: Utc::now(),
            database,
            statement: statement.to_string(),
            succeeded: result.is_ok(),
        });
        self.last_result = result.as_ref().ok().cloned();
        self.rescan();

        result
    }

    fn query_target(&self) -> Result<PathBuf> {
        if self.selection.table.is_some() {
            return Err(ManagerError::NoSelection(
                "You must query a database, a table is selected".to_string(),
            ));
        }
        self.selection.database.clone().ok_or_else(|| {
            ManagerError::NoSelection("Please select the database you want to query".to_string())
        })
    }

    /// Replace the editor text with SQL generated from it
    ///
    /// The generated SQL is left in the editor for review. On failure the
    /// editor keeps its previous contents.
    pub fn ask_ai(&mut self, generator: &dyn TextGenerator) -> Result<()> {
        let sql = translate::translate(generator, &self.editor)?;
        self.editor = sql;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Create `<folder>/<name>.<ext>` and rescan
    pub fn create_database(&mut self, name: &str) -> Result<PathBuf> {
        validate_database_name(name)?;
        let path = self.folder.join(database_file_name(name, &self.extension));

        let result = self.lifecycle.create_database(&path);
        self.rescan();
        result.map(|()| path)
    }

    /// Drop the selected table and rescan
    pub fn drop_selected_table(&mut self) -> Result<String> {
        let (Some(database), Some(table)) = (self.selection.database.clone(), self.selection.table.clone()) else {
            return Err(ManagerError::NoSelection(
                "Select the table you want to delete".to_string(),
            ));
        };

        let result = self.lifecycle.drop_table(&table, &database);
        self.rescan();
        result.map(|()| table)
    }

    /// Delete the selected database file and rescan
    pub fn delete_selected_database(&mut self) -> Result<PathBuf> {
        let Some(database) = self.selection.database.clone() else {
            return Err(ManagerError::NoSelection(
                "Select the database you want to remove".to_string(),
            ));
        };

        let result = self.lifecycle.delete_database(&database);
        self.rescan();
        result.map(|()| database)
    }

    // ------------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------------

    /// Export the last row result as JSON
    ///
    /// `None` means the save dialog was cancelled and is not an error.
    pub fn export_last_result(&self, destination: Option<&Path>) -> Result<ExportOutcome> {
        let result = match &self.last_result {
            Some(result) if result.row_count() > 0 => result,
            _ => return Err(ManagerError::NothingToExport),
        };

        let Some(path) = destination else {
            debug!("export cancelled");
            return Ok(ExportOutcome::Cancelled);
        };

        export::write_json(result, path, self.export_pretty)?;
        Ok(ExportOutcome::Written(path.to_path_buf()))
    }
}
