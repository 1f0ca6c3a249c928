//! Core data models for the expense tracker
//!
//! The only entity is the expense record; `Money` and `ExpenseId` are the
//! value types it is built from.

pub mod expense;
pub mod ids;
pub mod money;

pub use expense::{parse_date, Expense, ExpenseValidationError, DATE_FORMAT};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
