//! Writing configuration files.
//!
//! # Configuration File Format
//!
//! ```toml
//! [auth]
//! project_ref = "abcdefghijklmnop"
//! login_path = "/login"
//! validation = "presence"
//!
//! [table]
//! default_page_size = 10
//! default_sort = "citationCount"
//! default_direction = "descending"
//!
//! [data]
//! citers_file = "./citers.json"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use std::path::Path;

use super::Config;

/// Render the default configuration as TOML
pub fn default_config_toml() -> Result<String, ConfigFileError> {
    toml::to_string_pretty(&Config::default()).map_err(|e| ConfigFileError::Serialize(e.to_string()))
}

/// Save configuration to a TOML file, creating parent directories
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigFileError> {
    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    }

    std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
