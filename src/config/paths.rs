//! Path management for the expense tracker
//!
//! ## Path Resolution Order
//!
//! 1. An explicit base directory (the `--data-dir` flag)
//! 2. `EXPENSE_TRACKER_DATA_DIR` environment variable (if set)
//! 3. The platform data directory for `expense-tracker`

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::ExpenseError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "EXPENSE_TRACKER_DATA_DIR";

/// Default name of the expense store inside the base directory
pub const EXPENSES_FILE_NAME: &str = "expenses.csv";

/// Manages all paths used by the expense tracker
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    /// Base directory for settings, store and audit log
    base_dir: PathBuf,
    /// Explicit store location, overriding `<base>/expenses.csv`
    expenses_override: Option<PathBuf>,
}

impl ExpensePaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no platform data directory can be determined.
    pub fn new() -> Result<Self, ExpenseError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self::with_base_dir(base_dir))
    }

    /// Create ExpensePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            expenses_override: None,
        }
    }

    /// Store expenses at an explicit path instead of the base directory
    pub fn with_expenses_file(mut self, path: PathBuf) -> Self {
        self.expenses_override = Some(path);
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the expenses CSV
    pub fn expenses_file(&self) -> PathBuf {
        self.expenses_override
            .clone()
            .unwrap_or_else(|| self.base_dir.join(EXPENSES_FILE_NAME))
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ExpenseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ExpenseError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if settings have been written (`expense init`)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, ExpenseError> {
    ProjectDirs::from("", "", "expense-tracker")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ExpenseError::Config("Could not determine a data directory".into()))
}
