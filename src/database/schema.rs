//! Database schema definitions

/// SQL to create the users table of the credential database
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    name            TEXT NOT NULL,
    surname         TEXT NOT NULL,
    username        TEXT PRIMARY KEY,
    password_hash   BLOB NOT NULL
)
"#;

/// Tables of the credential database in creation order
pub const CREATE_ALL_TABLES: &[&str] = &[
    CREATE_USERS_TABLE,
];

/// Catalog query listing every table, in schema order
pub const LIST_TABLES: &str = "SELECT name FROM sqlite_master WHERE type = 'table'";
