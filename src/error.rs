//! Error types for MonkeyDB Core

use thiserror::Error;

/// Main error type for database manager operations
#[derive(Error, Debug)]
pub enum ManagerError {
    /// No account exists for the given username
    #[error("Username not found: {0}")]
    UserNotFound(String),

    /// Account exists but the password does not match
    #[error("Wrong password or username")]
    WrongCredentials,

    /// Registration conflict on the username key
    #[error("Username already taken: {0}")]
    DuplicateUser(String),

    /// Statement failed; carries the engine message verbatim
    #[error("{0}")]
    Query(String),

    /// Database, table or file does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Creation target already exists
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage engine failure outside of user-supplied statements
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database name is blank or not a plain file name
    #[error("Invalid database name: {0:?}")]
    InvalidName(String),

    /// Identifier rejected by the allow-list
    #[error("Invalid identifier {0:?}: only letters, digits and underscores are allowed")]
    InvalidIdentifier(String),

    /// Missing or malformed user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Workspace action needs a different selection
    #[error("{0}")]
    NoSelection(String),

    /// Export requested without a row result
    #[error("No result to export")]
    NothingToExport,

    /// NL to SQL generator failed or produced nothing
    #[error("Translation error: {0}")]
    Translation(String),

    /// Password hashing failure
    #[error("Hash error: {0}")]
    Hash(String),

    /// Configuration could not be read or written
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse error classification for callers that branch on the failure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    DuplicateUser,
    Query,
    NotFound,
    AlreadyExists,
    Io,
    Storage,
    Validation,
    Translation,
    Config,
}

impl ManagerError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ManagerError::UserNotFound(_) | ManagerError::WrongCredentials => ErrorKind::Auth,
            ManagerError::DuplicateUser(_) => ErrorKind::DuplicateUser,
            ManagerError::Query(_) => ErrorKind::Query,
            ManagerError::NotFound(_) => ErrorKind::NotFound,
            ManagerError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            ManagerError::Io(_) => ErrorKind::Io,
            ManagerError::Storage(_) | ManagerError::Hash(_) => ErrorKind::Storage,
            ManagerError::InvalidName(_)
            | ManagerError::InvalidIdentifier(_)
            | ManagerError::InvalidInput(_)
            | ManagerError::NoSelection(_)
            | ManagerError::NothingToExport => ErrorKind::Validation,
            ManagerError::Translation(_) => ErrorKind::Translation,
            ManagerError::Config(_) => ErrorKind::Config,
        }
    }

    /// Human-readable status line for the GUI
    pub fn status_text(&self) -> String {
        match self {
            ManagerError::UserNotFound(_) => "Username not found, please sign up".to_string(),
            ManagerError::Query(msg) => format!("Error: {}", msg),
            other => format!("Error: {}", other),
        }
    }
}

impl From<rusqlite::Error> for ManagerError {
    fn from(err: rusqlite::Error) -> Self {
        ManagerError::Storage(err.to_string())
    }
}

impl From<argon2::password_hash::Error> for ManagerError {
    fn from(err: argon2::password_hash::Error) -> Self {
        ManagerError::Hash(err.to_string())
    }
}

/// Result type alias for manager operations
pub type Result<T> = std::result::Result<T, ManagerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ManagerError::NotFound("/path/to/x.db".to_string());
        assert!(err.to_string().contains("/path/to/x.db"));

        let err = ManagerError::WrongCredentials;
        assert_eq!(err.to_string(), "Wrong password or username");

        let err = ManagerError::Query("near \"SELEC\": syntax error".to_string());
        assert_eq!(err.to_string(), "near \"SELEC\": syntax error");

        let err = ManagerError::DuplicateUser("marco".to_string());
        assert!(err.to_string().contains("marco"));

        let err = ManagerError::InvalidIdentifier("x; DROP".to_string());
        assert!(err.to_string().contains("x; DROP"));
    }

    #[test]
    fn test_error_from_rusqlite() {
        let sqlite_err = rusqlite::Error::QueryReturnedNoRows;
        let err: ManagerError = sqlite_err.into();
        match err {
            ManagerError::Storage(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Storage"),
        }
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(ManagerError::UserNotFound("a".into()).kind(), ErrorKind::Auth);
        assert_eq!(ManagerError::WrongCredentials.kind(), ErrorKind::Auth);
        assert_eq!(ManagerError::NotFound("a".into()).kind(), ErrorKind::NotFound);
        assert_eq!(ManagerError::AlreadyExists("a".into()).kind(), ErrorKind::AlreadyExists);
        assert_eq!(ManagerError::NothingToExport.kind(), ErrorKind::Validation);

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(ManagerError::from(io).kind(), ErrorKind::Io);
    }

    #[test]
    fn test_status_text() {
        let err = ManagerError::UserNotFound("ghost".to_string());
        assert_eq!(err.status_text(), "Username not found, please sign up");

        let err = ManagerError::Query("no such table: x".to_string());
        assert_eq!(err.status_text(), "Error: no such table: x");
    }
}
