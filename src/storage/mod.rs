//! Storage layer for the expense tracker
//!
//! Provides the CSV expense store with atomic writes and automatic
//! directory creation.

pub mod expenses;
pub mod file_io;

pub use expenses::{read_expenses, write_expenses, ExpenseStore};
pub use file_io::{open_optional, write_atomic};
