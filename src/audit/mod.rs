//! Audit logging for the expense tracker
//!
//! Every add, edit and delete is appended to `audit.log` as one JSON line
//! holding the expense fields before and after the change. `expense audit`
//! lists the most recent entries.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.append(&AuditEntry::added(&expense))?;
//! ```

mod entry;
mod logger;

pub use entry::{Action, AuditEntry, ExpenseSnapshot};
pub use logger::AuditLogger;
