//! Create, drop and delete operations
//!
//! These change what [`super::CatalogScanner`] observes; callers rescan
//! afterwards. Drop and delete are irreversible.

use std::io::ErrorKind as IoErrorKind;
use std::path::Path;
use tracing::{info, warn};
use crate::database::{Database, queries};
use crate::error::{ManagerError, Result};
use crate::utils::{validate_database_name, validate_identifier};

/// Files SQLite may leave next to a database
const SIDECAR_SUFFIXES: &[&str] = &["-journal", "-wal", "-shm"];

/// Database and table lifecycle operations
#[derive(Debug, Clone, Copy, Default)]
pub struct DatabaseLifecycle;

impl DatabaseLifecycle {
    pub fn new() -> Self {
        Self
    }

    /// Create an empty database file at `path`
    ///
    /// The file stem must be a non-blank plain name. Fails with
    /// [`ManagerError::AlreadyExists`] if anything is already at `path`.
    pub fn create_database(&self, path: &Path) -> Result<()> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        validate_database_name(&stem)?;

        // create_new makes the existence check and the creation one step
        match std::fs::OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => {}
            Err(e) if e.kind() == IoErrorKind::AlreadyExists => {
                return Err(ManagerError::AlreadyExists(path.display().to_string()));
            }
            Err(e) => return Err(ManagerError::Io(e)),
        }

        Database::open(path)?.close()?;
        info!(path = %path.display(), "database created");
        Ok(())
    }

    /// Drop `table` from the database at `database_path` if it exists
    pub fn drop_table(&self, table: &str, database_path: &Path) -> Result<()> {
        validate_identifier(table)?;

        let db = Database::open(database_path)?;
        queries::drop_table(db.connection()?, table)?;
        db.close()?;

        info!(table, path = %database_path.display(), "table dropped");
        Ok(())
    }

    /// Delete the database file at `path`
    ///
    /// Fails with [`ManagerError::NotFound`] if nothing is there, and with
    /// [`ManagerError::Io`] if the path cannot be removed as a file.
    /// Leftover journal files are removed as well.
    pub fn delete_database(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ManagerError::NotFound(path.display().to_string()));
        }

        std::fs::remove_file(path).map_err(|e| {
            ManagerError::Io(std::io::Error::new(
                e.kind(),
                format!("the database {} could not be deleted: {}", path.display(), e),
            ))
        })?;

        for suffix in SIDECAR_SUFFIXES {
            let mut sidecar = path.as_os_str().to_owned();
            sidecar.push(suffix);
            let sidecar = Path::new(&sidecar);
            if sidecar.exists()
                && let Err(e) = std::fs::remove_file(sidecar)
            {
                warn!(path = %sidecar.display(), error = %e, "could not remove journal file");
            }
        }

        info!(path = %path.display(), "database deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business::CatalogScanner;
    use tempfile::TempDir;

    #[test]
    fn test_create_database() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sales.db");

        DatabaseLifecycle::new().create_database(&path).unwrap();
        assert!(path.is_file());
        assert!(CatalogScanner::default().list_tables(&path).unwrap().is_empty());
    }

    #[test]
    fn test_create_database_conflict() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sales.db");
        std::fs::write(&path, b"keep me").unwrap();

        let result = DatabaseLifecycle::new().create_database(&path);
        assert!(matches!(result, Err(ManagerError::AlreadyExists(_))));
        assert_eq!(std::fs::read(&path).unwrap(), b"keep me");
    }

    #[test]
    fn test_create_database_blank_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("   .db");

        let result = DatabaseLifecycle::new().create_database(&path);
        assert!(matches!(result, Err(ManagerError::InvalidName(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_create_database_missing_folder() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("sales.db");

        let result = DatabaseLifecycle::new().create_database(&path);
        assert!(matches!(result, Err(ManagerError::Io(_))));
    }

    #[test]
    fn test_drop_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shop.db");
        Database::create(&path).unwrap()
            .connection().unwrap()
            .execute_batch("CREATE TABLE a(x); CREATE TABLE b(y);").unwrap();

        let lifecycle = DatabaseLifecycle::new();
        lifecycle.drop_table("a", &path).unwrap();
        assert_eq!(CatalogScanner::default().list_tables(&path).unwrap(), vec!["b".to_string()]);

        // Dropping again is a no-op
        lifecycle.drop_table("a", &path).unwrap();
    }

    #[test]
    fn test_drop_table_invalid_identifier() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shop.db");
        Database::create(&path).unwrap()
            .connection().unwrap()
            .execute_batch("CREATE TABLE a(x)").unwrap();

        let result = DatabaseLifecycle::new().drop_table("a; DROP TABLE a; --", &path);
        assert!(matches!(result, Err(ManagerError::InvalidIdentifier(_))));
        assert_eq!(CatalogScanner::default().list_tables(&path).unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn test_drop_table_missing_database() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gone.db");

        let result = DatabaseLifecycle::new().drop_table("a", &path);
        assert!(matches!(result, Err(ManagerError::NotFound(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_delete_database() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("old.db");
        let journal = temp_dir.path().join("old.db-journal");
        DatabaseLifecycle::new().create_database(&path).unwrap();
        std::fs::write(&journal, b"").unwrap();

        DatabaseLifecycle::new().delete_database(&path).unwrap();
        assert!(!path.exists());
        assert!(!journal.exists());
        assert!(CatalogScanner::default().list_databases(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_delete_missing_database_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = DatabaseLifecycle::new().delete_database(&temp_dir.path().join("ghost.db"));
        assert!(matches!(result, Err(ManagerError::NotFound(p)) if p.contains("ghost.db")));
    }

    #[test]
    fn test_delete_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("folder.db");
        std::fs::create_dir(&path).unwrap();

        let result = DatabaseLifecycle::new().delete_database(&path);
        assert!(matches!(result, Err(ManagerError::Io(_))));
        assert!(path.is_dir());
    }
}
