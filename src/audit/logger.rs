//! Append-only JSONL audit log
//!
//! Each change to the ledger becomes one JSON line. Lines are appended and
//! flushed one at a time; the file is never rewritten.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::error::{ExpenseError, ExpenseResult};
use crate::storage::open_optional;

use super::entry::AuditEntry;

/// Writes and reads the audit log file
#[derive(Debug, Clone)]
pub struct AuditLogger {
    path: PathBuf,
}

impl AuditLogger {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append one entry to the log
    pub fn append(&self, entry: &AuditEntry) -> ExpenseResult<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| ExpenseError::Audit(format!("Failed to encode entry: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ExpenseError::Audit(format!("Failed to create log directory: {}", e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                ExpenseError::Audit(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        writeln!(file, "{}", line)
            .and_then(|_| file.flush())
            .map_err(|e| ExpenseError::Audit(format!("Failed to write entry: {}", e)))
    }

    /// All entries, oldest first; a missing log is empty
    pub fn read_all(&self) -> ExpenseResult<Vec<AuditEntry>> {
        let Some(reader) = open_optional(&self.path)? else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|e| {
                ExpenseError::Audit(format!("Failed to read line {}: {}", line_number, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                ExpenseError::Audit(format!("Line {} is not a valid entry: {}", line_number, e))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> ExpenseResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let skip = entries.len().saturating_sub(count);
        Ok(entries.split_off(skip))
    }
}
