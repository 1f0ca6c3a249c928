//! Chart input series
//!
//! A chart takes two parallel lists: bar labels and bar amounts. The series
//! can be built per category (aggregated) or per expense (one bar per record,
//! so a category may appear more than once).

use crate::config::ChartMode;
use crate::models::{Expense, Money};

use super::summary::SpendingSummary;

/// Parallel label/amount lists fed to a chart renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartSeries {
    labels: Vec<String>,
    amounts: Vec<Money>,
}

impl ChartSeries {
    /// One bar per expense, in ledger order
    pub fn per_record(records: &[Expense]) -> Self {
        Self {
            labels: records.iter().map(|e| e.category.clone()).collect(),
            amounts: records.iter().map(|e| e.amount).collect(),
        }
    }

    /// One bar per category, in first-seen order
    pub fn per_category(summary: &SpendingSummary) -> Self {
        Self {
            labels: summary.categories.iter().map(|c| c.category.clone()).collect(),
            amounts: summary.categories.iter().map(|c| c.total).collect(),
        }
    }

    /// Build the series selected by the chart mode setting
    pub fn for_mode(mode: ChartMode, records: &[Expense], summary: &SpendingSummary) -> Self {
        match mode {
            ChartMode::Category => Self::per_category(summary),
            ChartMode::Record => Self::per_record(records),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn amounts(&self) -> &[Money] {
        &self.amounts
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate over `(label, amount)` bars
    pub fn bars(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.amounts.iter().copied())
    }
}
