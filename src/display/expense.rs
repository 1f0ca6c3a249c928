//! Expense listing for terminal display

use crate::ledger::{Ledger, ListView};

/// Shown when the ledger has nothing to list
pub const NOTHING_TO_DISPLAY: &str = "No expenses to display.";

/// Format the ledger as numbered lines, e.g. `1. Food - ₹12.50 on 2024-01-01`
pub fn format_expense_list(ledger: &Ledger, currency_symbol: &str) -> String {
    match ledger.list() {
        ListView::Empty => format!("{}\n", NOTHING_TO_DISPLAY),
        ListView::Entries(entries) => entries
            .map(|(index, expense)| format!("{}. {}\n", index, expense.describe(currency_symbol)))
            .collect(),
    }
}
