//! Audit log records
//!
//! One record per change to the ledger. Records hold plain text snapshots of
//! the expense fields so the log stays readable after the CSV has moved on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Expense, DATE_FORMAT};

/// What happened to an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Added,
    Edited,
    Deleted,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::Added => "ADD",
            Action::Edited => "EDIT",
            Action::Deleted => "DELETE",
        }
    }
}

/// Expense fields as text, as they were when the change happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSnapshot {
    pub amount: String,
    pub category: String,
    pub date: String,
}

impl From<&Expense> for ExpenseSnapshot {
    fn from(expense: &Expense) -> Self {
        Self {
            amount: expense.amount.to_decimal_string(),
            category: expense.category.clone(),
            date: expense.date.format(DATE_FORMAT).to_string(),
        }
    }
}

impl ExpenseSnapshot {
    /// Fields that differ from `newer`, as `field: "old" -> "new"`
    pub fn changes_to(&self, newer: &Self) -> Vec<String> {
        [
            ("amount", &self.amount, &newer.amount),
            ("category", &self.category, &newer.category),
            ("date", &self.date, &newer.date),
        ]
        .into_iter()
        .filter(|(_, old, new)| old != new)
        .map(|(field, old, new)| format!("{}: \"{}\" -> \"{}\"", field, old, new))
        .collect()
    }

    fn describe(&self) -> String {
        format!("{} - {} on {}", self.category, self.amount, self.date)
    }
}

/// A single line of the audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub action: Action,
    /// Session id of the expense, e.g. `exp-1a2b3c4d`
    pub expense_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<ExpenseSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<ExpenseSnapshot>,
    /// Changed fields, for edits only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<String>,
}

impl AuditEntry {
    pub fn added(expense: &Expense) -> Self {
        Self::record(Action::Added, expense, None, Some(expense.into()))
    }

    pub fn edited(before: &Expense, after: &Expense) -> Self {
        let old = ExpenseSnapshot::from(before);
        let new = ExpenseSnapshot::from(after);
        Self {
            changes: old.changes_to(&new),
            ..Self::record(Action::Edited, after, Some(old), Some(new))
        }
    }

    pub fn deleted(expense: &Expense) -> Self {
        Self::record(Action::Deleted, expense, Some(expense.into()), None)
    }

    fn record(
        action: Action,
        expense: &Expense,
        before: Option<ExpenseSnapshot>,
        after: Option<ExpenseSnapshot>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            expense_id: expense.id.to_string(),
            before,
            after,
            changes: Vec::new(),
        }
    }

    /// One-line form used when listing the log
    pub fn summary_line(&self) -> String {
        let subject = self
            .after
            .as_ref()
            .or(self.before.as_ref())
            .map(ExpenseSnapshot::describe)
            .unwrap_or_default();

        let mut line = format!(
            "{}  {:<6}  {}  {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.action.label(),
            self.expense_id,
            subject
        );
        if !self.changes.is_empty() {
            line.push_str(&format!(" ({})", self.changes.join("; ")));
        }
        line
    }
}
