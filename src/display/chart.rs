//! Horizontal bar chart for the terminal
//!
//! Draws one bar per label of a [`ChartSeries`], scaled so the largest
//! amount fills the configured width.

use std::io::{self, Write};

use crate::reports::ChartSeries;

use super::report::{format_bar, left_align, separator, truncate};

/// Widest label column, in characters
const MAX_LABEL_WIDTH: usize = 20;

const TITLE: &str = "Expenses by Category";

/// Shown in place of an empty category label
const BLANK_LABEL: &str = "(none)";

/// Text bar chart renderer
#[derive(Debug, Clone)]
pub struct BarChart<'a> {
    width: usize,
    currency_symbol: &'a str,
}

impl<'a> BarChart<'a> {
    pub fn new(width: usize, currency_symbol: &'a str) -> Self {
        Self {
            width: width.max(1),
            currency_symbol,
        }
    }

    /// Render the chart to a string
    pub fn render(&self, series: &ChartSeries) -> String {
        let mut output = format!("\n{}\n", TITLE);

        if series.is_empty() {
            output.push_str("No expenses to chart.\n");
            return output;
        }

        let labels: Vec<String> = series
            .labels()
            .iter()
            .map(|label| {
                if label.is_empty() {
                    BLANK_LABEL.to_string()
                } else {
                    truncate(label, MAX_LABEL_WIDTH)
                }
            })
            .collect();
        let label_width = labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max("Category".len());

        let max_amount = series
            .amounts()
            .iter()
            .map(|m| m.as_f64())
            .fold(0.0_f64, f64::max);

        output.push_str(&format!(
            "{} {}\n",
            left_align("Category", label_width),
            left_align(&format!("Amount ({})", self.currency_symbol), self.width)
        ));
        output.push_str(&separator(label_width + 1 + self.width + 12));
        output.push('\n');

        for (label, amount) in labels.iter().zip(series.amounts()) {
            output.push_str(&format!(
                "{} {} {}\n",
                left_align(label, label_width),
                format_bar(amount.as_f64(), max_amount, self.width),
                amount.format_with_symbol(self.currency_symbol)
            ));
        }

        output
    }

    /// Write the chart to an output stream
    pub fn draw<W: Write + ?Sized>(&self, series: &ChartSeries, out: &mut W) -> io::Result<()> {
        out.write_all(self.render(series).as_bytes())
    }
}
