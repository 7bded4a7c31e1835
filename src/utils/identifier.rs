//! Identifier and name validation
//!
//! Table names reaching DDL built by this crate must pass the allow-list
//! below. User-typed SQL in the query editor is not subject to it.

use crate::error::{ManagerError, Result};

/// Check a table name against `[A-Za-z_][A-Za-z0-9_]*`
pub fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');

    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ManagerError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

/// Validate and double-quote an identifier for use in DDL
pub fn quote_identifier(name: &str) -> Result<String> {
    validate_identifier(name)?;
    Ok(format!("\"{}\"", name))
}

/// Check a new database name before any filesystem access
///
/// Rejects blank names and anything that is not a plain file name.
pub fn validate_database_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ManagerError::InvalidName(name.to_string()));
    }
    if trimmed == "." || trimmed == ".." || trimmed.contains(['/', '\\', '\0']) {
        return Err(ManagerError::InvalidName(name.to_string()));
    }
    Ok(())
}
