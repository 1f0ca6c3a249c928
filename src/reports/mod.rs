//! Reports module for the expense tracker
//!
//! Computes total and per-category spending, and the series drawn by the
//! summary bar chart.

pub mod series;
pub mod summary;

pub use series::ChartSeries;
pub use summary::{by_category, total, CategoryTotal, SpendingSummary};
