//! Folder catalog
//!
//! Lists database files in a folder and the tables inside each one. The
//! scan is the source of truth; nothing here is cached between scans.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use crate::database::{Catalog, Database, DatabaseEntry, queries};
use crate::error::Result;
use crate::utils::has_extension;

/// Scans folders for database files
#[derive(Debug, Clone)]
pub struct CatalogScanner {
    /// Extension that marks a database file, without the dot
    extension: String,
}

impl Default for CatalogScanner {
    fn default() -> Self {
        Self::new(crate::DATABASE_EXTENSION)
    }
}

impl CatalogScanner {
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.to_string(),
        }
    }

    /// Extension this scanner recognizes
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Database files directly inside `folder`, sorted by path
    ///
    /// A missing or non-directory path yields an empty list. Subfolders are
    /// not visited.
    pub fn list_databases(&self, folder: &Path) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(folder) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(folder = %folder.display(), error = %e, "folder not readable, empty catalog");
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_extension(path, &self.extension))
            .collect();
        paths.sort();
        paths
    }

    /// Table names of one database, from the system catalog
    pub fn list_tables(&self, database_path: &Path) -> Result<Vec<String>> {
        let db = Database::open_read_only(database_path)?;
        let tables = queries::list_tables(db.connection()?)?;
        db.close()?;
        Ok(tables)
    }

    /// Full scan of `folder`
    ///
    /// A database whose tables cannot be read is still listed, with no
    /// tables and the failure recorded; the rest of the scan continues.
    pub fn scan(&self, folder: &Path) -> Catalog {
        let databases: Vec<DatabaseEntry> = self
            .list_databases(folder)
            .into_iter()
            .map(|path| {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();

                match self.list_tables(&path) {
                    Ok(tables) => DatabaseEntry { path, name, tables, error: None },
                    Err(e) => {
                        warn!(database = %name, error = %e, "skipping tables of unreadable database");
                        DatabaseEntry { path, name, tables: Vec::new(), error: Some(e.to_string()) }
                    }
                }
            })
            .collect();

        info!(folder = %folder.display(), databases = databases.len(), "catalog scanned");
        Catalog {
            folder: folder.to_path_buf(),
            databases,
        }
    }
}
