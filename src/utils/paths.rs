//! Filesystem path helpers

use std::path::{Path, PathBuf};
use crate::error::{ManagerError, Result};

/// Per-user application data directory, created if absent
pub fn app_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| {
        ManagerError::Config("No per-user data directory on this platform".to_string())
    })?;
    let dir = base.join(crate::APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// File name for a database called `name` (`sales` -> `sales.db`)
pub fn database_file_name(name: &str, extension: &str) -> String {
    format!("{}.{}", name.trim(), extension)
}

/// Check the file extension, ASCII case-insensitively
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
