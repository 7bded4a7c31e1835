//! Data models for users, query results and the folder catalog

use std::fmt;
use std::path::{Path, PathBuf};
use rusqlite::types::ValueRef;
use serde::{Deserialize, Serialize};

/// Stored account row of the credential database
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub surname: String,
    /// Natural key, unique
    pub username: String,
    /// PHC-format Argon2 hash; the salt is embedded
    pub password_hash: Vec<u8>,
}

impl UserRecord {
    /// Public profile without the hash
    pub fn profile(&self) -> User {
        User {
            name: self.name.clone(),
            surname: self.surname.clone(),
            username: self.username.clone(),
        }
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Authenticated user as handed to the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub surname: String,
    pub username: String,
}

/// Outcome of a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyResult {
    Authenticated(User),
    WrongCredentials,
    UserNotFound,
}

impl VerifyResult {
    /// Check for a successful login
    pub fn is_authenticated(&self) -> bool {
        matches!(self, VerifyResult::Authenticated(_))
    }

    /// Convert into the user, mapping each failure to its own error
    pub fn into_user(self, username: &str) -> crate::Result<User> {
        match self {
            VerifyResult::Authenticated(user) => Ok(user),
            VerifyResult::WrongCredentials => Err(crate::ManagerError::WrongCredentials),
            VerifyResult::UserNotFound => {
                Err(crate::ManagerError::UserNotFound(username.to_string()))
            }
        }
    }
}

/// Single cell of a result set, in the engine's native type
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl CellValue {
    /// Text form used by exports; `None` for SQL NULL
    pub fn to_export_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Check for SQL NULL
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Real(r) => write!(f, "{}", r),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Blob(bytes) => {
                for b in bytes {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
        }
    }
}

impl From<ValueRef<'_>> for CellValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => CellValue::Null,
            ValueRef::Integer(i) => CellValue::Integer(i),
            ValueRef::Real(r) => CellValue::Real(r),
            ValueRef::Text(t) => CellValue::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => CellValue::Blob(b.to_vec()),
        }
    }
}

/// Result of executing one statement
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Row-returning statement; every row has `columns.len()` values
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    },
    /// Statement executed and committed, nothing to show
    Ack,
}

impl QueryResult {
    /// Column names, empty for an acknowledgment
    pub fn columns(&self) -> &[String] {
        match self {
            QueryResult::Rows { columns, .. } => columns,
            QueryResult::Ack => &[],
        }
    }

    /// Rows, empty for an acknowledgment
    pub fn rows(&self) -> &[Vec<CellValue>] {
        match self {
            QueryResult::Rows { rows, .. } => rows,
            QueryResult::Ack => &[],
        }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    /// Check if this result carries a table shape
    pub fn is_rows(&self) -> bool {
        matches!(self, QueryResult::Rows { .. })
    }
}

/// A table found while introspecting a database file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableCatalogEntry {
    pub database_path: PathBuf,
    pub table_name: String,
}

/// One database file of the scanned folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseEntry {
    pub path: PathBuf,
    /// File name shown in the tree
    pub name: String,
    pub tables: Vec<String>,
    /// Why the tables could not be listed, if they could not
    pub error: Option<String>,
}

impl DatabaseEntry {
    /// Check whether the table is listed
    pub fn has_table(&self, table: &str) -> bool {
        self.tables.iter().any(|t| t == table)
    }

    /// Flatten into catalog entries
    pub fn table_entries(&self) -> impl Iterator<Item = TableCatalogEntry> + '_ {
        self.tables.iter().map(|t| TableCatalogEntry {
            database_path: self.path.clone(),
            table_name: t.clone(),
        })
    }
}

/// Derived tree of database files and tables; recomputed on every scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub(crate) folder: PathBuf,
    pub(crate) databases: Vec<DatabaseEntry>,
}

impl Catalog {
    /// Folder this catalog was scanned from
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Database entries in path order
    pub fn databases(&self) -> &[DatabaseEntry] {
        &self.databases
    }

    /// Look up a database by path
    pub fn database(&self, path: &Path) -> Option<&DatabaseEntry> {
        self.databases.iter().find(|d| d.path == path)
    }

    /// Check whether a database path was found by the scan
    pub fn contains_database(&self, path: &Path) -> bool {
        self.database(path).is_some()
    }

    /// All tables across all databases
    pub fn tables(&self) -> Vec<TableCatalogEntry> {
        self.databases.iter().flat_map(|d| d.table_entries()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }
}
