//! Runtime configuration.
//!
//! Values come from, in order of precedence: explicit arguments, then
//! `COURIER_*` environment variables, then platform defaults:
//! - Linux: ~/.local/share/courier
//! - macOS: ~/Library/Application Support/courier
//! - Windows: %APPDATA%/courier
//!
//! When the platform has no data directory, `./data` is used.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "COURIER_DATA_DIR";
/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "COURIER_LOG";
/// Environment variable overriding the import size limit, in bytes.
pub const MAX_IMPORT_BYTES_ENV: &str = "COURIER_MAX_IMPORT_BYTES";

const APP_DIR: &str = "courier";
const FALLBACK_DATA_DIR: &str = "data";
const DEFAULT_LOG_FILTER: &str = "info";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Import limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Maximum file size in bytes (default: 10 MiB).
    pub max_file_size: u64,
    /// Maximum folder nesting depth (default: 32).
    pub max_depth: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            max_depth: 32,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root of the file storage.
    pub data_dir: PathBuf,
    /// Import limits.
    pub import: ImportConfig,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a `COURIER_*` variable holds an unparsable value.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::from_lookup(data_dir, |key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparsable value.
    pub fn from_lookup(
        data_dir: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_dir = data_dir
            .or_else(|| lookup(DATA_DIR_ENV).filter(|v| !v.is_empty()).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        let log_filter = lookup(LOG_ENV)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let mut import = ImportConfig::default();
        if let Some(value) = lookup(MAX_IMPORT_BYTES_ENV) {
            import.max_file_size = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: MAX_IMPORT_BYTES_ENV,
                    value,
                })?;
        }

        Ok(Self {
            data_dir,
            import,
            log_filter,
        })
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(FALLBACK_DATA_DIR), |p| p.join(APP_DIR))
}
