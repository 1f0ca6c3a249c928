//! Expense Tracker - personal expense tracking from the terminal
//!
//! This library provides the core functionality of the expense tracker:
//! recording expenses, keeping them in a CSV file, summarizing spending by
//! category and drawing a bar chart of the result.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, expenses, IDs)
//! - `storage`: CSV record store
//! - `ledger`: In-memory expense list with add/edit/delete/list
//! - `services`: Ledger operations with persistence and audit logging
//! - `reports`: Totals and per-category aggregation
//! - `display`: Terminal formatting and the bar chart
//! - `audit`: Audit logging system
//! - `cli`: Interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{ExpensePaths, Settings};
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
