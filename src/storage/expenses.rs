//! Expense store backed by a CSV file
//!
//! The file has a fixed `amount,category,date` header and one expense per
//! row. Every save replaces the whole file.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_date, Expense, Money, DATE_FORMAT};

use super::file_io::{open_optional, write_atomic};

/// Column header written at the top of every store file
pub const HEADER: [&str; 3] = ["amount", "category", "date"];

/// One CSV row, with values kept as text until validated
#[derive(Debug, Serialize, Deserialize)]
struct ExpenseRow {
    amount: String,
    category: String,
    date: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            amount: expense.amount.to_decimal_string(),
            category: expense.category.clone(),
            date: expense.date.format(DATE_FORMAT).to_string(),
        }
    }
}

impl ExpenseRow {
    fn into_expense(self, line: u64) -> ExpenseResult<Expense> {
        let amount = Money::parse(&self.amount)
            .map_err(|e| ExpenseError::Storage(format!("Row {}: {}", line, e)))?;
        let date = parse_date(&self.date).map_err(|e| {
            ExpenseError::Storage(format!("Row {}: invalid date '{}': {}", line, self.date, e))
        })?;
        Ok(Expense::from_stored(amount, self.category, date))
    }
}

/// Reads and writes the full expense list
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all expenses; a missing file is an empty list
    pub fn load(&self) -> ExpenseResult<Vec<Expense>> {
        match open_optional(&self.path)? {
            Some(reader) => read_expenses(reader).map_err(|e| match e {
                ExpenseError::Storage(msg) => {
                    ExpenseError::Storage(format!("{}: {}", self.path.display(), msg))
                }
                other => other,
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the file with the given expenses
    pub fn save(&self, expenses: &[Expense]) -> ExpenseResult<()> {
        write_atomic(&self.path, |out| write_expenses(out, expenses))
    }
}

/// Parse expenses from CSV text with an `amount,category,date` header
pub fn read_expenses<R: Read>(reader: R) -> ExpenseResult<Vec<Expense>> {
    let mut csv_reader = ReaderBuilder::new().from_reader(reader);
    let mut expenses = Vec::new();

    for (index, row) in csv_reader.deserialize::<ExpenseRow>().enumerate() {
        // Line 1 is the header
        let line = index as u64 + 2;
        let row = row.map_err(|e| ExpenseError::Storage(format!("Row {}: {}", line, e)))?;
        expenses.push(row.into_expense(line)?);
    }

    Ok(expenses)
}

/// Write expenses as CSV, header first
pub fn write_expenses<W: Write + ?Sized>(out: &mut W, expenses: &[Expense]) -> ExpenseResult<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(out);

    csv_writer.write_record(HEADER)?;
    for expense in expenses {
        csv_writer.serialize(ExpenseRow::from(expense))?;
    }
    csv_writer.flush()?;

    Ok(())
}
