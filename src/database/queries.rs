//! SQL query operations for database access
//!
//! Low-level functions over an open connection. Callers own the handle
//! lifetime; see [`super::Database`].

use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use crate::error::{ManagerError, Result};
use crate::utils::quote_identifier;
use super::models::{CellValue, UserRecord};
use super::schema;

// ============================================================================
// Users queries
// ============================================================================

/// Create the credential tables if missing
pub fn create_user_tables(conn: &Connection) -> Result<()> {
    for sql in schema::CREATE_ALL_TABLES {
        conn.execute(sql, [])?;
    }
    Ok(())
}

/// Insert a user row
///
/// A primary key conflict on `username` is reported as
/// [`ManagerError::DuplicateUser`]; the existing row is kept.
pub fn insert_user(conn: &Connection, record: &UserRecord) -> Result<()> {
    let result = conn.execute(
        "INSERT INTO users (name, surname, username, password_hash) VALUES (?, ?, ?, ?)",
        params![record.name, record.surname, record.username, record.password_hash],
    );

    match result {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            Err(ManagerError::DuplicateUser(record.username.clone()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Get a user row by username
pub fn get_user(conn: &Connection, username: &str) -> Result<Option<UserRecord>> {
    let record = conn
        .query_row(
            "SELECT name, surname, username, password_hash FROM users WHERE username = ?",
            params![username],
            |row| {
                Ok(UserRecord {
                    name: row.get(0)?,
                    surname: row.get(1)?,
                    username: row.get(2)?,
                    password_hash: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(record)
}

// ============================================================================
// Catalog queries
// ============================================================================

/// List table names from the engine's system catalog
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(schema::LIST_TABLES)?;
    let tables = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(tables)
}

/// Drop a table if it exists
///
/// The name must pass [`crate::utils::validate_identifier`]; it is also
/// quoted in the generated statement.
pub fn drop_table(conn: &Connection, table: &str) -> Result<()> {
    let sql = format!("DROP TABLE IF EXISTS {}", quote_identifier(table)?);
    conn.execute_batch(&sql)?;
    Ok(())
}

// ============================================================================
// Raw statement execution
// ============================================================================

/// Run a row-returning statement and collect its columns and rows
///
/// Column order is the order the engine reports.
pub fn select_rows(conn: &Connection, sql: &str) -> rusqlite::Result<(Vec<String>, Vec<Vec<CellValue>>)> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();

    let mut rows = Vec::new();
    let mut cursor = stmt.query([])?;
    while let Some(row) = cursor.next()? {
        let mut values = Vec::with_capacity(width);
        for idx in 0..width {
            values.push(CellValue::from(row.get_ref(idx)?));
        }
        rows.push(values);
    }

    Ok((columns, rows))
}

/// Run a single statement for its side effects
///
/// Text holding more than one statement is rejected before anything runs.
/// Rows the statement yields (`PRAGMA`, `WITH ... SELECT`) are stepped
/// through and discarded. The connection is in autocommit mode, so a
/// successful return means the change is committed.
pub fn execute_statement(conn: &Connection, sql: &str) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    while rows.next()?.is_some() {}
    Ok(())
}
