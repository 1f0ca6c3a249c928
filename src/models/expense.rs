//! Expense record model
//!
//! An expense is a single spending event: a positive amount, a free-text
//! category label and the calendar date it happened on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// Date format used for input and for the CSV store
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Session-stable identifier, never persisted
    pub id: ExpenseId,

    /// Amount spent, always positive for records created or edited in a session
    pub amount: Money,

    /// Category label, stored exactly as trimmed input
    pub category: String,

    /// Day the expense happened
    pub date: NaiveDate,
}

impl Expense {
    /// Create a new expense, trimming the category
    ///
    /// An empty category is accepted; only the amount is validated.
    pub fn new(
        amount: Money,
        category: &str,
        date: NaiveDate,
    ) -> Result<Self, ExpenseValidationError> {
        let expense = Self {
            id: ExpenseId::new(),
            amount,
            category: category.trim().to_string(),
            date,
        };
        expense.validate()?;
        Ok(expense)
    }

    /// Rebuild an expense read from the store
    ///
    /// Stored rows are taken as they are; no validation happens on load.
    pub fn from_stored(amount: Money, category: String, date: NaiveDate) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            category,
            date,
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }

    /// One-line description, e.g. `Food - ₹12.50 on 2024-01-01`
    pub fn describe(&self, currency_symbol: &str) -> String {
        format!(
            "{} - {} on {}",
            self.category,
            self.amount.format_with_symbol(currency_symbol),
            self.date.format(DATE_FORMAT)
        )
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format(DATE_FORMAT),
            self.category,
            self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than 0 (got {})", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
}
