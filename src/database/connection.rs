//! Scoped database handles
//!
//! Every operation opens its own handle, acts, and releases it before
//! returning. The handle is closed on drop, so early returns through `?`
//! release it as well.

use std::path::{Path, PathBuf};
use rusqlite::{Connection, OpenFlags};
use tracing::debug;
use crate::error::{ManagerError, Result};

/// How a database file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Existing file, no writes
    ReadOnly,
    /// Existing file, reads and writes
    ReadWrite,
    /// Create the file when it is missing
    Create,
}

impl OpenMode {
    fn flags(self) -> OpenFlags {
        let base = OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        match self {
            OpenMode::ReadOnly => base | OpenFlags::SQLITE_OPEN_READ_ONLY,
            OpenMode::ReadWrite => base | OpenFlags::SQLITE_OPEN_READ_WRITE,
            OpenMode::Create => {
                base | OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
            }
        }
    }
}

/// Short-lived connection to one database file
pub struct Database {
    /// Path to the database file
    path: PathBuf,
    /// SQLite connection
    conn: Option<Connection>,
}

impl Database {
    /// Open an existing database file for reading and writing
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with(path, OpenMode::ReadWrite)
    }

    /// Open an existing database file without write access
    pub fn open_read_only(path: &Path) -> Result<Self> {
        Self::open_with(path, OpenMode::ReadOnly)
    }

    /// Open a database file, creating it if missing
    pub fn create(path: &Path) -> Result<Self> {
        Self::open_with(path, OpenMode::Create)
    }

    /// Open with an explicit mode
    ///
    /// Modes other than [`OpenMode::Create`] never create a file; a missing
    /// path is reported as [`ManagerError::NotFound`].
    pub fn open_with(path: &Path, mode: OpenMode) -> Result<Self> {
        if mode != OpenMode::Create && !path.is_file() {
            return Err(ManagerError::NotFound(path.display().to_string()));
        }

        let conn = Connection::open_with_flags(path, mode.flags())?;
        debug!(path = %path.display(), ?mode, "database handle opened");

        Ok(Self {
            path: path.to_path_buf(),
            conn: Some(conn),
        })
    }

    /// Get a reference to the connection
    pub fn connection(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(|| {
            ManagerError::Storage("Database not open".to_string())
        })
    }

    /// Get the database path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the handle is still open
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Close the handle, reporting any error SQLite raises while closing
    pub fn close(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, err)| ManagerError::from(err))?;
            debug!(path = %self.path.display(), "database handle closed");
        }
        Ok(())
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Errors here have nowhere to go; `close` is the reporting path.
        let _ = self.release();
    }
}
