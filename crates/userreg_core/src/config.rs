//! Runtime configuration for the user store.
//!
//! # Responsibility
//! - Resolve the data file location from an optional override.
//! - Derive the default log directory next to the data file.
//!
//! # Invariants
//! - An unset or blank override falls back to [`DEFAULT_DATA_FILE`].

use std::path::{Path, PathBuf};

/// Data file used when no override is configured.
pub const DEFAULT_DATA_FILE: &str = "data/users.json";
/// Environment variable consulted for the data file location.
pub const DATA_FILE_ENV: &str = "DATA_FILE_PATH";
/// Number of attempts granted to every guarded prompt.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 4;

const LOG_DIR_NAME: &str = "logs";

/// Store settings resolved at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// JSON document holding every user record.
    pub data_file: PathBuf,
}

impl StoreConfig {
    /// Builds a config from an optional data file override.
    pub fn new(data_file: Option<PathBuf>) -> Self {
        let data_file = data_file
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        Self { data_file }
    }

    /// Returns `<data dir>/logs`, made absolute against `cwd` if relative.
    pub fn default_log_dir(&self, cwd: &Path) -> PathBuf {
        let data_dir = self
            .data_file
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let log_dir = data_dir.join(LOG_DIR_NAME);
        if log_dir.is_absolute() {
            log_dir
        } else {
            cwd.join(log_dir)
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(None)
    }
}
