//! Utility functions

pub mod identifier;
pub mod paths;

pub use identifier::{quote_identifier, validate_database_name, validate_identifier};
pub use paths::{app_data_dir, database_file_name, has_extension};
