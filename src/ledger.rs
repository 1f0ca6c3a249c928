//! In-memory expense ledger
//!
//! The ledger is the ordered list of expenses for a session. Users select
//! records by 1-based display index, which is recomputed from the current
//! position on every listing and shifts down after a deletion. Each record
//! also has a stable [`ExpenseId`] for code that needs to hold on to it.

use chrono::{Local, NaiveDate};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_date, Expense, ExpenseId, Money};

const INVALID_DATE: &str = "Invalid date format. Please use YYYY-MM-DD.";

/// Raw field input for an edit; empty strings keep the current value
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseEdit<'a> {
    pub amount: &'a str,
    pub category: &'a str,
    pub date: &'a str,
    /// Currency symbol the amount may be typed with
    pub currency_symbol: &'a str,
}

/// Result of a successful edit call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Index 0 was given; nothing changed
    Cancelled,
    /// The record at `index` was updated
    Edited {
        index: usize,
        before: Expense,
        after: Expense,
    },
}

/// Result of a successful delete call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Index 0 was given; nothing changed
    Cancelled,
    /// The record was removed; later records moved up one position
    Deleted { index: usize, expense: Expense },
}

/// A listing of the ledger
pub enum ListView<'a> {
    /// The ledger has no records
    Empty,
    /// Records with their display index, in ledger order
    Entries(Entries<'a>),
}

/// Iterator over `(display_index, expense)` pairs, starting at 1
pub struct Entries<'a> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, Expense>>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (usize, &'a Expense);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(i, expense)| (i + 1, expense))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}

/// Ordered collection of expenses for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap records loaded from the store, keeping their order
    pub fn from_records(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    pub fn records(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Get the record at a 1-based display index
    pub fn get(&self, index: usize) -> Option<&Expense> {
        index.checked_sub(1).and_then(|i| self.expenses.get(i))
    }

    /// Current display index of a record
    pub fn position_of(&self, id: ExpenseId) -> Option<usize> {
        self.expenses
            .iter()
            .position(|expense| expense.id == id)
            .map(|i| i + 1)
    }

    /// Add an expense dated today when no date is given
    pub fn add(
        &mut self,
        amount_input: &str,
        category_input: &str,
        date_input: &str,
    ) -> ExpenseResult<&Expense> {
        self.add_on(
            amount_input,
            category_input,
            date_input,
            Local::now().date_naive(),
        )
    }

    /// Add an expense, using `today` when `date_input` is blank
    ///
    /// Nothing is appended if the amount is not a positive number or the
    /// date is not `YYYY-MM-DD`.
    pub fn add_on(
        &mut self,
        amount_input: &str,
        category_input: &str,
        date_input: &str,
        today: NaiveDate,
    ) -> ExpenseResult<&Expense> {
        let amount = parse_amount(amount_input)?;
        self.add_parsed(amount, category_input, date_input, today)
    }

    /// Add an expense whose amount was already parsed
    pub fn add_parsed(
        &mut self,
        amount: Money,
        category_input: &str,
        date_input: &str,
        today: NaiveDate,
    ) -> ExpenseResult<&Expense> {
        let date_input = date_input.trim();
        let date = if date_input.is_empty() {
            today
        } else {
            parse_date(date_input).map_err(|_| ExpenseError::Validation(INVALID_DATE.into()))?
        };

        let expense = Expense::new(amount, category_input, date)
            .map_err(|e| ExpenseError::Validation(format!("Invalid input for amount: {}", e)))?;

        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    /// Edit the record at a 1-based display index
    ///
    /// All supplied fields are parsed before any is applied, so a bad value
    /// leaves the record untouched. Index 0 cancels.
    pub fn edit(&mut self, index: usize, edit: ExpenseEdit<'_>) -> ExpenseResult<EditOutcome> {
        if index == 0 {
            return Ok(EditOutcome::Cancelled);
        }

        let slot = index
            .checked_sub(1)
            .filter(|i| *i < self.expenses.len())
            .ok_or_else(|| ExpenseError::expense_not_found(index.to_string()))?;

        let amount = match edit.amount.trim() {
            "" => None,
            input => Some(parse_amount_with_symbol(input, edit.currency_symbol)?),
        };
        let category = match edit.category.trim() {
            "" => None,
            input => Some(input.to_string()),
        };
        let date = match edit.date.trim() {
            "" => None,
            input => Some(
                parse_date(input).map_err(|_| ExpenseError::Validation(INVALID_DATE.into()))?,
            ),
        };

        let expense = &mut self.expenses[slot];
        let before = expense.clone();

        if let Some(amount) = amount {
            expense.amount = amount;
        }
        if let Some(category) = category {
            expense.category = category;
        }
        if let Some(date) = date {
            expense.date = date;
        }

        Ok(EditOutcome::Edited {
            index,
            before,
            after: expense.clone(),
        })
    }

    /// Delete the record at a 1-based display index
    ///
    /// Later records shift down one position. Index 0 cancels.
    pub fn delete(&mut self, index: usize) -> ExpenseResult<DeleteOutcome> {
        if index == 0 {
            return Ok(DeleteOutcome::Cancelled);
        }

        if index > self.expenses.len() {
            return Err(ExpenseError::expense_not_found(index.to_string()));
        }

        let expense = self.expenses.remove(index - 1);
        Ok(DeleteOutcome::Deleted { index, expense })
    }

    /// List records with their current display index
    pub fn list(&self) -> ListView<'_> {
        if self.expenses.is_empty() {
            ListView::Empty
        } else {
            ListView::Entries(Entries {
                inner: self.expenses.iter().enumerate(),
            })
        }
    }
}

/// Parse a positive amount from user input
pub fn parse_amount(input: &str) -> ExpenseResult<Money> {
    parse_amount_with_symbol(input, "")
}

/// Parse a positive amount that may be prefixed with `currency_symbol`
pub fn parse_amount_with_symbol(input: &str, currency_symbol: &str) -> ExpenseResult<Money> {
    let amount = Money::parse_with_symbol(input, currency_symbol)
        .map_err(|e| ExpenseError::Validation(format!("Invalid input for amount: {}", e)))?;

    if !amount.is_positive() {
        return Err(ExpenseError::Validation(
            "Invalid input for amount: Amount must be greater than 0.".into(),
        ));
    }

    Ok(amount)
}
