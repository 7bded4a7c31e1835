//! Raw statement execution
//!
//! Executes exactly the text it is given. Nothing is parsed beyond the
//! leading keyword that decides whether rows are collected.

use std::path::Path;
use tracing::{debug, info};
use crate::database::{Database, QueryResult, queries};
use crate::error::{ManagerError, Result};

/// Leading keyword of row-returning statements
const ROW_KEYWORD: &str = "select";

/// Executes one statement per call against a database file
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEngine;

impl QueryEngine {
    pub fn new() -> Self {
        Self
    }

    /// Check whether a statement is treated as row-returning
    pub fn returns_rows(statement: &str) -> bool {
        let trimmed = statement.trim_start();
        trimmed
            .get(..ROW_KEYWORD.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(ROW_KEYWORD))
            && trimmed[ROW_KEYWORD.len()..]
                .chars()
                .next()
                .is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
    }

    /// Execute `statement` against the database at `database_path`
    ///
    /// Any failure (missing file, malformed SQL, constraint violation) is a
    /// [`ManagerError::Query`] carrying the engine message. Text holding
    /// more than one statement is rejected without running any of it.
    /// Non-row statements are committed before `Ack` is returned.
    pub fn execute(&self, database_path: &Path, statement: &str) -> Result<QueryResult> {
        let db = Database::open(database_path).map_err(into_query_error)?;
        let conn = db.connection().map_err(into_query_error)?;
        debug!(path = %database_path.display(), statement, "executing statement");

        let result = if Self::returns_rows(statement) {
            let (columns, rows) = queries::select_rows(conn, statement)
                .map_err(|e| ManagerError::Query(e.to_string()))?;
            info!(path = %database_path.display(), columns = columns.len(), rows = rows.len(), "query returned rows");
            QueryResult::Rows { columns, rows }
        } else {
            queries::execute_statement(conn, statement)
                .map_err(|e| ManagerError::Query(e.to_string()))?;
            info!(path = %database_path.display(), "statement executed");
            QueryResult::Ack
        };

        db.close().map_err(into_query_error)?;
        Ok(result)
    }
}

fn into_query_error(err: ManagerError) -> ManagerError {
    match err {
        ManagerError::NotFound(path) => {
            ManagerError::Query(format!("unable to open database file: {}", path))
        }
        ManagerError::Storage(msg) => ManagerError::Query(msg),
        other => other,
    }
}
