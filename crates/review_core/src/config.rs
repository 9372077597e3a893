//! Store configuration.
//!
//! # Responsibility
//! - Describe how to open the backing database and where logs go.
//! - Deserialize from any serde format with every field defaulted.

use crate::logging::{default_log_level, init_logging};
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Connection and logging settings for a review store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Database file. `None` opens an in-memory database.
    pub db_path: Option<PathBuf>,
    /// Enforce `reviews.employee_id -> employees.id`.
    pub foreign_keys: bool,
    pub busy_timeout_ms: u64,
    /// One of `trace|debug|info|warn|error`; build default when unset.
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files. Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            foreign_keys: true,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            log_level: None,
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Config for a file-backed database with default settings.
    pub fn with_db_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    /// Starts file logging when `log_dir` is configured.
    ///
    /// # Errors
    /// - Propagates `init_logging` errors (bad level, bad directory,
    ///   conflicting re-initialization).
    pub fn init_logging(&self) -> Result<(), String> {
        let Some(log_dir) = self.log_dir.as_deref() else {
            return Ok(());
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log_dir is not valid UTF-8: `{}`", log_dir.display()))?;
        init_logging(self.effective_log_level(), log_dir)
    }
}
