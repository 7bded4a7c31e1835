//! Application configuration
//!
//! Loaded from `<config_dir>/MonkeyDB/config.toml` when present, defaults
//! otherwise.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::error::{ManagerError, Result};

/// Configuration file name
pub const CONFIG_FILENAME: &str = "config.toml";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Credential database location; per-user data dir when unset
    #[serde(default)]
    pub users_db_path: Option<PathBuf>,

    /// Folder opened when a workspace starts; current dir when unset
    #[serde(default)]
    pub default_folder: Option<PathBuf>,

    /// Extension that marks a file as a database
    #[serde(default = "default_extension")]
    pub database_extension: String,

    /// Indent exported JSON
    #[serde(default = "default_export_pretty")]
    pub export_pretty: bool,
}

fn default_extension() -> String {
    crate::DATABASE_EXTENSION.to_string()
}

fn default_export_pretty() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            users_db_path: None,
            default_folder: None,
            database_extension: default_extension(),
            export_pretty: default_export_pretty(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ManagerError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ManagerError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Loads the default configuration file, or defaults if there is none.
    pub fn load_default() -> Result<Self> {
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Returns the default configuration file path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(crate::APP_NAME).join(CONFIG_FILENAME))
    }

    /// Resolve the credential database path
    pub fn users_db_path(&self) -> Result<PathBuf> {
        match &self.users_db_path {
            Some(path) => Ok(path.clone()),
            None => Ok(crate::utils::app_data_dir()?.join(crate::USERS_DB_FILENAME)),
        }
    }

    /// Resolve the folder a new workspace starts in
    pub fn start_folder(&self) -> Result<PathBuf> {
        match &self.default_folder {
            Some(folder) => Ok(folder.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    fn validate(&self) -> Result<()> {
        let ext = &self.database_extension;
        if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
            return Err(ManagerError::Config(format!(
                "database_extension must be a bare extension like \"db\", got {:?}",
                ext
            )));
        }
        Ok(())
    }
}
