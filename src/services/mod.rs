//! Service layer for the expense tracker
//!
//! The service layer sits on top of the ledger and the storage layer,
//! handling persistence and audit logging around each operation.

pub mod expense;

pub use expense::ExpenseService;
