//! Configuration management.
//!
//! Settings are layered: built-in defaults, then a TOML file, then
//! `MERITPATH_*` environment variables (nested keys separated by `__`, e.g.
//! `MERITPATH_AUTH__PROJECT_REF`).

mod file_config;

pub use file_config::{default_config_toml, save_config, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{SortDirection, SortKey, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Authentication settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// Table defaults
    #[serde(default)]
    pub table: TableConfig,

    /// Data source settings
    #[serde(default)]
    pub data: DataConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How session tokens are checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Any non-empty auth cookie is accepted
    #[default]
    Presence,
    /// The cookie must hold an unexpired session
    Session,
}

/// Authentication configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Project reference used in the auth cookie name
    #[serde(default)]
    pub project_ref: Option<String>,

    /// Where unauthenticated requests are redirected
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Token validation mode
    #[serde(default)]
    pub validation: ValidationMode,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            project_ref: None,
            login_path: default_login_path(),
            validation: ValidationMode::default(),
        }
    }
}

fn default_login_path() -> String {
    "/login".to_string()
}

/// Table defaults applied when a view is first shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    #[serde(default)]
    pub default_sort: SortKey,

    #[serde(default)]
    pub default_direction: SortDirection,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            default_sort: SortKey::default(),
            default_direction: SortDirection::default(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl TableConfig {
    /// Replace a page size outside the selector options with the default
    fn normalize(&mut self) {
        if !PAGE_SIZE_OPTIONS.contains(&self.default_page_size) {
            tracing::warn!(
                "table.default_page_size = {} is not one of {:?}; using {}",
                self.default_page_size,
                PAGE_SIZE_OPTIONS,
                DEFAULT_PAGE_SIZE
            );
            self.default_page_size = DEFAULT_PAGE_SIZE;
        }
    }
}

/// Data source configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON file with citers; the bundled sample is used when unset
    #[serde(default)]
    pub citers_file: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "pretty" (default) or "json"
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    /// Whether JSON log output was requested
    pub fn is_json(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(env_source())
        .build()?;

    settings.try_deserialize().map(normalized)
}

/// Configuration from defaults and environment variables only
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(env_source())
        .build()?
        .try_deserialize()
        .map(normalized)
}

fn normalized(mut config: Config) -> Config {
    config.table.normalize();
    config
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix("MERITPATH")
        .prefix_separator("_")
        .separator("__")
}

/// Look for a config file in the default locations
///
/// Checks `./meritpath.toml`, then `<config dir>/meritpath/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("meritpath.toml");
    if local.is_file() {
        return Some(local);
    }

    default_config_path().filter(|path| path.is_file())
}

/// Default location for the user config file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("meritpath").join("config.toml"))
}
