//! Display formatting for terminal output
//!
//! Provides the numbered expense listing, the summary bar chart and shared
//! formatting helpers.

pub mod chart;
pub mod expense;
pub mod report;

pub use chart::BarChart;
pub use expense::{format_expense_list, NOTHING_TO_DISPLAY};
