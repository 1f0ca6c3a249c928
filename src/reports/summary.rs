//! Spending summary
//!
//! Totals spending overall and per category. Categories are compared by
//! exact string equality and reported in the order they first appear.

use std::collections::HashMap;

use crate::display::report::format_percentage;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money};

/// Spending for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// Category label as stored
    pub category: String,
    /// Sum of amounts in this category
    pub total: Money,
    /// Number of expenses in this category
    pub count: usize,
    /// Share of overall spending, 0-100
    pub percentage: f64,
}

/// Overall and per-category spending
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingSummary {
    pub total: Money,
    /// Per-category totals in first-seen order
    pub categories: Vec<CategoryTotal>,
    pub record_count: usize,
}

/// Sum of all amounts; zero for no records
///
/// Fails with [`ExpenseError::Overflow`] when the sum does not fit.
pub fn total(records: &[Expense]) -> ExpenseResult<Money> {
    Money::checked_sum(records.iter().map(|expense| &expense.amount))
        .ok_or_else(|| ExpenseError::Overflow("total of all expenses is too large".into()))
}

/// Per-category sums, in the order each category first appears
pub fn by_category(records: &[Expense]) -> ExpenseResult<Vec<(String, Money)>> {
    Ok(tally(records)?
        .into_iter()
        .map(|(category, total, _)| (category, total))
        .collect())
}

fn tally(records: &[Expense]) -> ExpenseResult<Vec<(String, Money, usize)>> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(String, Money, usize)> = Vec::new();

    for expense in records {
        let slot = *slots.entry(expense.category.as_str()).or_insert_with(|| {
            totals.push((expense.category.clone(), Money::zero(), 0));
            totals.len() - 1
        });
        let (category, sum, count) = &mut totals[slot];
        *sum = sum.checked_add(expense.amount).ok_or_else(|| {
            ExpenseError::Overflow(format!("total for category '{}' is too large", category))
        })?;
        *count += 1;
    }

    Ok(totals)
}

impl SpendingSummary {
    /// Summarize a list of expenses
    pub fn generate(records: &[Expense]) -> ExpenseResult<Self> {
        let total = total(records)?;

        let categories = tally(records)?
            .into_iter()
            .map(|(category, category_total, count)| {
                let percentage = if total.is_zero() {
                    0.0
                } else {
                    category_total.as_f64() / total.as_f64() * 100.0
                };
                CategoryTotal {
                    category,
                    total: category_total,
                    count,
                    percentage,
                }
            })
            .collect();

        Ok(Self {
            total,
            categories,
            record_count: records.len(),
        })
    }

    /// Look up the total for a category
    pub fn category_total(&self, category: &str) -> Option<Money> {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.total)
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = format!(
            "\nTotal spent: {}\n",
            self.total.format_with_symbol(currency_symbol)
        );

        output.push_str("\nSpending by category:\n");
        for category in &self.categories {
            output.push_str(&format!(
                "{}: {} ({})\n",
                category.category,
                category.total.format_with_symbol(currency_symbol),
                format_percentage(category.percentage)
            ));
        }

        output
    }
}
