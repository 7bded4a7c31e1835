//! Local user accounts
//!
//! One dedicated SQLite file holds the `users` table. Every call opens its
//! own handle and releases it before returning.

use std::path::{Path, PathBuf};
use tracing::{info, warn};
use crate::config::AppConfig;
use crate::crypto;
use crate::database::{Database, UserRecord, VerifyResult, queries};
use crate::error::{ManagerError, Result};

/// Credential storage and password verification
#[derive(Debug, Clone)]
pub struct CredentialStore {
    /// Path to the credential database file
    path: PathBuf,
}

impl CredentialStore {
    /// Use the credential database at `path`
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Use the location resolved from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(&config.users_db_path()?))
    }

    /// Path to the credential database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the users table exists; safe to call on every startup
    pub fn initialize(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(&self.path)?;
        queries::create_user_tables(db.connection()?)?;
        db.close()
    }

    /// Register a new user
    ///
    /// Returns `Ok(false)` when the username is already taken; the existing
    /// account is left unchanged. Blank fields are rejected before hashing.
    pub fn register(&self, name: &str, surname: &str, username: &str, password: &str) -> Result<bool> {
        let fields = [("name", name), ("surname", surname), ("username", username), ("password", password)];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ManagerError::InvalidInput(format!("{} is required", field)));
        }

        let record = UserRecord {
            name: name.to_string(),
            surname: surname.to_string(),
            username: username.to_string(),
            password_hash: crypto::hash_password(password)?,
        };

        let db = Database::open(&self.path)?;
        match queries::insert_user(db.connection()?, &record) {
            Ok(()) => {
                info!(username, "user registered");
                Ok(true)
            }
            Err(ManagerError::DuplicateUser(_)) => {
                warn!(username, "registration rejected, username taken");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Check a username and password
    pub fn verify(&self, username: &str, password: &str) -> Result<VerifyResult> {
        let db = Database::open_read_only(&self.path)?;
        let record = queries::get_user(db.connection()?, username)?;
        db.close()?;

        let Some(record) = record else {
            crypto::verify_against_dummy(password);
            info!(username, "login failed, unknown user");
            return Ok(VerifyResult::UserNotFound);
        };

        if crypto::verify_password(password, &record.password_hash)? {
            info!(username, "login succeeded");
            Ok(VerifyResult::Authenticated(record.profile()))
        } else {
            info!(username, "login failed, wrong password");
            Ok(VerifyResult::WrongCredentials)
        }
    }
}
