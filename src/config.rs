//! Runtime configuration.
//!
//! # Examples
//!
//! ```
//! use taskdesk::config::{StorageConfig, TaskDeskConfig};
//!
//! let config = TaskDeskConfig::default();
//! assert_eq!(config.due_soon_days, 7);
//!
//! let storage = StorageConfig::in_dir("/var/lib/taskdesk");
//! assert_eq!(storage.data_dir.as_str(), "/var/lib/taskdesk");
//! ```

use camino::Utf8PathBuf;
use std::env;

/// Environment variable overriding [`StorageConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "TASKDESK_DATA_DIR";

/// Environment variable overriding [`TaskDeskConfig::log_filter`].
pub const LOG_FILTER_ENV: &str = "TASKDESK_LOG";

/// Location of the JSON collections on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding the collection files. Created on first open.
    pub data_dir: Utf8PathBuf,
    /// Task collection file name, relative to `data_dir`.
    pub tasks_file: Utf8PathBuf,
    /// Category collection file name, relative to `data_dir`.
    pub categories_file: Utf8PathBuf,
    /// Priority collection file name, relative to `data_dir`.
    pub priorities_file: Utf8PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::in_dir("medialab")
    }
}

impl StorageConfig {
    /// Uses the default file names inside `data_dir`.
    #[must_use]
    pub fn in_dir(data_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            tasks_file: Utf8PathBuf::from("tasks.json"),
            categories_file: Utf8PathBuf::from("categories.json"),
            priorities_file: Utf8PathBuf::from("priorities.json"),
        }
    }

    /// Reads `TASKDESK_DATA_DIR`, falling back to the default directory.
    #[must_use]
    pub fn from_env() -> Self {
        env::var(DATA_DIR_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(Self::default, Self::in_dir)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDeskConfig {
    /// Storage location.
    pub storage: StorageConfig,
    /// `tracing-subscriber` filter directive.
    pub log_filter: String,
    /// Window, in days, counted as "due soon" by the summary.
    pub due_soon_days: u32,
}

impl Default for TaskDeskConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            log_filter: "info".to_owned(),
            due_soon_days: 7,
        }
    }
}

impl TaskDeskConfig {
    /// Applies `TASKDESK_DATA_DIR` and `TASKDESK_LOG` over the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let log_filter = env::var(LOG_FILTER_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "info".to_owned());

        Self {
            storage: StorageConfig::from_env(),
            log_filter,
            ..Self::default()
        }
    }
}
