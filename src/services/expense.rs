//! Expense service
//!
//! Ties the in-memory ledger to its CSV store and the audit log. Ledger
//! operations are applied first; the audit entry is written after a
//! successful mutation, and persisting is an explicit `save` call.

use chrono::{Local, NaiveDate};

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{ExpenseError, ExpenseResult};
use crate::ledger::{parse_amount, DeleteOutcome, EditOutcome, ExpenseEdit, Ledger};
use crate::models::{Expense, Money};
use crate::reports::SpendingSummary;
use crate::storage::ExpenseStore;

/// Service for expense management over one session
pub struct ExpenseService {
    ledger: Ledger,
    store: ExpenseStore,
    audit: Option<AuditLogger>,
    audit_error: Option<ExpenseError>,
}

impl ExpenseService {
    /// Load the ledger from the store
    pub fn open(store: ExpenseStore, audit: Option<AuditLogger>) -> ExpenseResult<Self> {
        let ledger = Ledger::from_records(store.load()?);
        Ok(Self {
            ledger,
            store,
            audit,
            audit_error: None,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    /// Add an expense from raw input, using `today` when `date_input` is blank
    pub fn add_on(
        &mut self,
        amount_input: &str,
        category_input: &str,
        date_input: &str,
        today: NaiveDate,
    ) -> ExpenseResult<Expense> {
        let amount = parse_amount(amount_input)?;
        self.add_amount_on(amount, category_input, date_input, today)
    }

    /// Add an expense with a parsed amount, dated today when no date is given
    pub fn add_amount(
        &mut self,
        amount: Money,
        category_input: &str,
        date_input: &str,
    ) -> ExpenseResult<Expense> {
        self.add_amount_on(amount, category_input, date_input, Local::now().date_naive())
    }

    /// Add an expense with a parsed amount, using `today` when `date_input` is blank
    pub fn add_amount_on(
        &mut self,
        amount: Money,
        category_input: &str,
        date_input: &str,
        today: NaiveDate,
    ) -> ExpenseResult<Expense> {
        let expense = self
            .ledger
            .add_parsed(amount, category_input, date_input, today)?
            .clone();

        self.audit(AuditEntry::added(&expense));
        Ok(expense)
    }

    /// Edit the expense at a 1-based display index
    pub fn edit(&mut self, index: usize, edit: ExpenseEdit<'_>) -> ExpenseResult<EditOutcome> {
        let outcome = self.ledger.edit(index, edit)?;

        if let EditOutcome::Edited { before, after, .. } = &outcome {
            self.audit(AuditEntry::edited(before, after));
        }
        Ok(outcome)
    }

    /// Delete the expense at a 1-based display index
    pub fn delete(&mut self, index: usize) -> ExpenseResult<DeleteOutcome> {
        let outcome = self.ledger.delete(index)?;

        if let DeleteOutcome::Deleted { expense, .. } = &outcome {
            self.audit(AuditEntry::deleted(expense));
        }
        Ok(outcome)
    }

    /// Write the whole ledger to the store
    pub fn save(&self) -> ExpenseResult<()> {
        self.store.save(self.ledger.records())
    }

    /// Total and per-category spending of the current ledger
    pub fn summary(&self) -> ExpenseResult<SpendingSummary> {
        SpendingSummary::generate(self.ledger.records())
    }

    /// Take the last audit failure, if any
    ///
    /// Audit failures never undo a ledger change; callers report them.
    pub fn take_audit_error(&mut self) -> Option<ExpenseError> {
        self.audit_error.take()
    }

    fn audit(&mut self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.append(&entry) {
                self.audit_error = Some(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Action;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn create_test_service(temp_dir: &TempDir) -> ExpenseService {
        let store = ExpenseStore::new(temp_dir.path().join("expenses.csv"));
        let audit = AuditLogger::new(temp_dir.path().join("audit.log"));
        ExpenseService::open(store, Some(audit)).unwrap()
    }

    #[test]
    fn test_open_missing_store() {
        let temp_dir = TempDir::new().unwrap();
        let service = create_test_service(&temp_dir);
        assert!(service.ledger().is_empty());
    }

    #[test]
    fn test_add_save_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let mut service = create_test_service(&temp_dir);

        service.add_on("12.50", "Food", "", day()).unwrap();
        service.save().unwrap();

        let reopened = create_test_service(&temp_dir);
        assert_eq!(reopened.ledger().len(), 1);
        let expense = reopened.ledger().get(1).unwrap();
        assert_eq!(expense.amount, Money::from_cents(1250));
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.date, day());
    }

    #[test]
    fn test_summary_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let mut service = create_test_service(&temp_dir);
        service.add_on("12.50", "Food", "", day()).unwrap();

        let summary = service.summary().unwrap();
        assert_eq!(summary.total, Money::from_cents(1250));
        assert_eq!(summary.categories.len(), 1);
        assert_eq!(summary.category_total("Food").unwrap(), Money::from_cents(1250));
    }

    #[test]
    fn test_mutations_are_audited() {
        let temp_dir = TempDir::new().unwrap();
        let mut service = create_test_service(&temp_dir);

        service.add_on("10", "Food", "", day()).unwrap();
        service
            .edit(
                1,
                ExpenseEdit {
                    amount: "15",
                    ..Default::default()
                },
            )
            .unwrap();
        service.delete(1).unwrap();

        let entries = AuditLogger::new(temp_dir.path().join("audit.log"))
            .read_all()
            .unwrap();
        let actions: Vec<Action> = entries.iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![Action::Added, Action::Edited, Action::Deleted]);
        assert_eq!(entries[1].changes, vec!["amount: \"10.00\" -> \"15.00\""]);
        assert!(service.take_audit_error().is_none());
    }

    #[test]
    fn test_rejected_and_cancelled_are_not_audited() {
        let temp_dir = TempDir::new().unwrap();
        let mut service = create_test_service(&temp_dir);

        assert!(service.add_on("-1", "Food", "", day()).is_err());
        service.add_on("1", "Food", "", day()).unwrap();
        assert_eq!(service.delete(0).unwrap(), DeleteOutcome::Cancelled);
        assert_eq!(
            service.edit(0, ExpenseEdit::default()).unwrap(),
            EditOutcome::Cancelled
        );
        assert!(service.delete(5).is_err());

        let entries = AuditLogger::new(temp_dir.path().join("audit.log"))
            .read_all()
            .unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_audit_failure_keeps_mutation() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.csv"));
        // A directory cannot be opened for appending
        let audit = AuditLogger::new(temp_dir.path().to_path_buf());
        let mut service = ExpenseService::open(store, Some(audit)).unwrap();

        service.add_on("5", "Food", "", day()).unwrap();

        assert_eq!(service.ledger().len(), 1);
        assert!(matches!(
            service.take_audit_error(),
            Some(ExpenseError::Audit(_))
        ));
        assert!(service.take_audit_error().is_none());
    }

    #[test]
    fn test_without_audit_logger() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.csv"));
        let mut service = ExpenseService::open(store, None).unwrap();

        service.add_on("5", "Food", "", day()).unwrap();
        assert!(!temp_dir.path().join("audit.log").exists());
    }

    #[test]
    fn test_add_amount_skips_reparsing() {
        let temp_dir = TempDir::new().unwrap();
        let mut service = create_test_service(&temp_dir);

        let expense = service
            .add_amount_on(Money::from_cents(999), "Books", "2024-03-01", day())
            .unwrap();
        assert_eq!(expense.amount, Money::from_cents(999));
        assert_eq!(service.ledger().len(), 1);
    }

    #[test]
    fn test_summary_overflow_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let mut service = create_test_service(&temp_dir);

        service
            .add_on("50000000000000000000000000000", "Food", "", day())
            .unwrap();
        service
            .add_on("50000000000000000000000000000", "Rent", "", day())
            .unwrap();

        assert!(matches!(service.summary(), Err(ExpenseError::Overflow(_))));
    }
}
