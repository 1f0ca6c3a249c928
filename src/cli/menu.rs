//! Interactive text menu
//!
//! A thin driver over [`ExpenseService`]: it prints the menu, reads one
//! answer per line and reports the outcome of each operation. Input and
//! output are generic streams so sessions can be scripted.

use std::io::{BufRead, Write};

use crate::config::Settings;
use crate::display::{format_expense_list, BarChart};
use crate::error::{ExpenseError, ExpenseResult};
use crate::ledger::{parse_amount_with_symbol, DeleteOutcome, EditOutcome, ExpenseEdit};
use crate::models::DATE_FORMAT;
use crate::reports::ChartSeries;
use crate::services::ExpenseService;

const MENU: &str = "\nMenu:\n\
                    1. Add Expense\n\
                    2. View Summary\n\
                    3. Edit an Expense\n\
                    4. Delete an Expense\n\
                    5. Exit\n";

/// A menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Summary,
    Edit,
    Delete,
    Exit,
}

impl MenuChoice {
    /// Parse a menu answer; anything but 1-5 is `None`
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::Summary),
            "3" => Some(Self::Edit),
            "4" => Some(Self::Delete),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// How an index prompt was answered
enum Selection {
    Index(usize),
    Cancel,
    OutOfRange,
    NotANumber,
}

/// Interactive session over an input and an output stream
pub struct Menu<'a, R, W> {
    service: &'a mut ExpenseService,
    settings: &'a Settings,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        service: &'a mut ExpenseService,
        settings: &'a Settings,
        input: R,
        output: W,
    ) -> Self {
        Self {
            service,
            settings,
            input,
            output,
        }
    }

    /// Run until Exit is chosen or input ends
    ///
    /// The ledger is saved after every add, edit and delete, and once more
    /// on exit. Only the final save can fail the session.
    pub fn run(&mut self) -> ExpenseResult<()> {
        loop {
            self.output.write_all(MENU.as_bytes())?;
            let Some(answer) = self.prompt("Enter your choice: ")? else {
                break;
            };

            match MenuChoice::parse(&answer) {
                Some(MenuChoice::Add) => {
                    self.add()?;
                    self.save_and_report()?;
                }
                Some(MenuChoice::Summary) => self.summary()?,
                Some(MenuChoice::Edit) => {
                    self.edit()?;
                    self.save_and_report()?;
                }
                Some(MenuChoice::Delete) => {
                    self.delete()?;
                    self.save_and_report()?;
                }
                Some(MenuChoice::Exit) => break,
                None => writeln!(self.output, "Invalid choice, please try again.")?,
            }
        }

        self.service.save()?;
        writeln!(self.output, "Goodbye!")?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, text: &str) -> ExpenseResult<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt where end of input counts as a blank answer
    fn prompt_or_blank(&mut self, text: &str) -> ExpenseResult<String> {
        Ok(self.prompt(text)?.unwrap_or_default())
    }

    fn add(&mut self) -> ExpenseResult<()> {
        let symbol = self.settings.currency_symbol.clone();
        let input = self.prompt_or_blank(&format!("Enter the amount ({}): ", symbol))?;
        let amount = match parse_amount_with_symbol(&input, &symbol) {
            Ok(amount) => amount,
            Err(e) => return self.report_error(&e),
        };

        let category = self.prompt_or_blank("Enter the category (e.g., Food, Transport): ")?;
        let date =
            self.prompt_or_blank("Enter the date (YYYY-MM-DD) or leave blank for today: ")?;

        match self.service.add_amount(amount, &category, &date) {
            Ok(_) => writeln!(self.output, "Expense added successfully!")?,
            Err(e) => self.report_error(&e)?,
        }
        self.report_audit_failure()
    }

    fn summary(&mut self) -> ExpenseResult<()> {
        let settings: &Settings = self.settings;
        let summary = match self.service.summary() {
            Ok(summary) => summary,
            Err(e) => return self.report_error(&e),
        };
        let series = ChartSeries::for_mode(
            settings.chart_mode,
            self.service.ledger().records(),
            &summary,
        );

        let text = summary.format_terminal(&settings.currency_symbol);
        self.output.write_all(text.as_bytes())?;
        BarChart::new(settings.chart_width, &settings.currency_symbol)
            .draw(&series, &mut self.output)?;
        Ok(())
    }

    fn edit(&mut self) -> ExpenseResult<()> {
        if self.service.ledger().is_empty() {
            writeln!(self.output, "No expenses to edit.")?;
            return Ok(());
        }

        let index = match self.select("Enter the expense number to edit (or 0 to cancel): ")? {
            Selection::Index(index) => index,
            Selection::Cancel => return Ok(()),
            Selection::OutOfRange => {
                writeln!(self.output, "Invalid number. Please try again.")?;
                return Ok(());
            }
            Selection::NotANumber => {
                writeln!(self.output, "Invalid input. Please enter a valid number.")?;
                return Ok(());
            }
        };

        let symbol = self.settings.currency_symbol.clone();
        let Some(current) = self.service.ledger().get(index).cloned() else {
            return self.report_error(&ExpenseError::expense_not_found(index.to_string()));
        };
        writeln!(
            self.output,
            "Editing expense {}: {}",
            index,
            current.describe(&symbol)
        )?;

        let amount = self.prompt_or_blank(&format!(
            "New amount (current: {}): ",
            current.amount.format_with_symbol(&symbol)
        ))?;
        let category =
            self.prompt_or_blank(&format!("New category (current: {}): ", current.category))?;
        let date = self.prompt_or_blank(&format!(
            "New date (YYYY-MM-DD, current: {}): ",
            current.date.format(DATE_FORMAT)
        ))?;

        let edit = ExpenseEdit {
            amount: &amount,
            category: &category,
            date: &date,
            currency_symbol: &symbol,
        };
        match self.service.edit(index, edit) {
            Ok(EditOutcome::Edited { .. }) => {
                writeln!(self.output, "Expense updated successfully!")?
            }
            Ok(EditOutcome::Cancelled) => {}
            Err(e) => self.report_error(&e)?,
        }
        self.report_audit_failure()
    }

    fn delete(&mut self) -> ExpenseResult<()> {
        if self.service.ledger().is_empty() {
            writeln!(self.output, "No expenses to delete.")?;
            return Ok(());
        }

        let index = match self.select("Enter the expense number to delete (or 0 to cancel): ")? {
            Selection::Index(index) => index,
            Selection::Cancel => return Ok(()),
            Selection::OutOfRange => {
                writeln!(self.output, "Invalid number. Please try again.")?;
                return Ok(());
            }
            Selection::NotANumber => {
                writeln!(self.output, "Invalid input. Please enter a valid number.")?;
                return Ok(());
            }
        };

        match self.service.delete(index) {
            Ok(DeleteOutcome::Deleted { .. }) => {
                writeln!(self.output, "Expense deleted successfully!")?
            }
            Ok(DeleteOutcome::Cancelled) => {}
            Err(e) => self.report_error(&e)?,
        }
        self.report_audit_failure()
    }

    /// Show the listing and ask for a display index
    fn select(&mut self, text: &str) -> ExpenseResult<Selection> {
        let listing = format_expense_list(self.service.ledger(), &self.settings.currency_symbol);
        self.output.write_all(listing.as_bytes())?;

        let Some(answer) = self.prompt(text)? else {
            return Ok(Selection::Cancel);
        };

        let selection = match answer.parse::<i64>() {
            Err(_) => Selection::NotANumber,
            Ok(0) => Selection::Cancel,
            Ok(n) => match usize::try_from(n) {
                Ok(index) if index <= self.service.ledger().len() => Selection::Index(index),
                _ => Selection::OutOfRange,
            },
        };
        Ok(selection)
    }

    fn save_and_report(&mut self) -> ExpenseResult<()> {
        if let Err(e) = self.service.save() {
            writeln!(self.output, "Error saving expenses: {}", e)?;
        }
        Ok(())
    }

    fn report_error(&mut self, error: &ExpenseError) -> ExpenseResult<()> {
        match error {
            ExpenseError::Validation(message) => writeln!(self.output, "{}", message)?,
            ExpenseError::NotFound { .. } => {
                writeln!(self.output, "Invalid number. Please try again.")?
            }
            other => writeln!(self.output, "Error: {}", other)?,
        }
        Ok(())
    }

    fn report_audit_failure(&mut self) -> ExpenseResult<()> {
        if let Some(e) = self.service.take_audit_error() {
            writeln!(self.output, "Warning: {}", e)?;
        }
        Ok(())
    }
}

/// Run an interactive session
pub fn run_menu<R: BufRead, W: Write>(
    service: &mut ExpenseService,
    settings: &Settings,
    input: R,
    output: W,
) -> ExpenseResult<()> {
    Menu::new(service, settings, input, output).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::ExpenseStore;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_script(temp_dir: &TempDir, script: &str) -> (ExpenseService, String) {
        let store = ExpenseStore::new(temp_dir.path().join("expenses.csv"));
        let mut service = ExpenseService::open(store, None).unwrap();
        let settings = Settings::default();
        let mut output = Vec::new();

        run_menu(&mut service, &settings, Cursor::new(script), &mut output).unwrap();
        (service, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse(" 5 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("6"), None);
        assert_eq!(MenuChoice::parse("add"), None);
    }

    #[test]
    fn test_add_and_exit_persists() {
        let temp_dir = TempDir::new().unwrap();
        let (service, output) = run_script(&temp_dir, "1\n12.50\nFood\n2024-01-01\n5\n");

        assert!(output.contains("Expense added successfully!"));
        assert!(output.contains("Goodbye!"));
        assert_eq!(service.ledger().len(), 1);

        let saved = std::fs::read_to_string(temp_dir.path().join("expenses.csv")).unwrap();
        assert_eq!(saved, "amount,category,date\n12.50,Food,2024-01-01\n");
    }

    #[test]
    fn test_bad_amount_skips_remaining_prompts() {
        let temp_dir = TempDir::new().unwrap();
        let (service, output) = run_script(&temp_dir, "1\n-4\n5\n");

        assert!(output.contains("Invalid input for amount"));
        assert!(!output.contains("Enter the category"));
        assert!(service.ledger().is_empty());
    }

    #[test]
    fn test_bad_date_rejects_add() {
        let temp_dir = TempDir::new().unwrap();
        let (service, output) = run_script(&temp_dir, "1\n5\nFood\n01-01-2024\n5\n");

        assert!(output.contains("Invalid date format. Please use YYYY-MM-DD."));
        assert!(service.ledger().is_empty());
    }

    #[test]
    fn test_invalid_choice() {
        let temp_dir = TempDir::new().unwrap();
        let (_, output) = run_script(&temp_dir, "9\n5\n");
        assert!(output.contains("Invalid choice, please try again."));
    }

    #[test]
    fn test_end_of_input_exits_and_saves() {
        let temp_dir = TempDir::new().unwrap();
        let (_, output) = run_script(&temp_dir, "");

        assert!(output.contains("Goodbye!"));
        assert!(temp_dir.path().join("expenses.csv").exists());
    }

    #[test]
    fn test_summary_prints_totals_and_chart() {
        let temp_dir = TempDir::new().unwrap();
        let script = "1\n10\nFood\n2024-01-01\n1\n5\nFood\n2024-01-02\n1\n20\nTransport\n2024-01-03\n2\n5\n";
        let (_, output) = run_script(&temp_dir, script);

        assert!(output.contains("Total spent: ₹35.00"));
        assert!(output.contains("Food: ₹15.00"));
        assert!(output.contains("Transport: ₹20.00"));
        assert!(output.contains("Expenses by Category"));

        let food_pos = output.find("Food: ₹15.00").unwrap();
        let transport_pos = output.find("Transport: ₹20.00").unwrap();
        assert!(food_pos < transport_pos);
    }

    #[test]
    fn test_edit_flow() {
        let temp_dir = TempDir::new().unwrap();
        let script = "1\n10\nFood\n2024-01-01\n3\n1\n\nGroceries\n\n5\n";
        let (service, output) = run_script(&temp_dir, script);

        assert!(output.contains("1. Food - ₹10.00 on 2024-01-01"));
        assert!(output.contains("Editing expense 1: Food - ₹10.00 on 2024-01-01"));
        assert!(output.contains("Expense updated successfully!"));

        let expense = service.ledger().get(1).unwrap();
        assert_eq!(expense.category, "Groceries");
        assert_eq!(expense.amount, Money::from_cents(1000));
    }

    #[test]
    fn test_edit_bad_amount_changes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let script = "1\n10\nFood\n2024-01-01\n3\n1\nabc\nGroceries\n\n5\n";
        let (service, output) = run_script(&temp_dir, script);

        assert!(output.contains("Invalid input for amount"));
        assert_eq!(service.ledger().get(1).unwrap().category, "Food");
    }

    #[test]
    fn test_edit_and_delete_on_empty_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let (_, output) = run_script(&temp_dir, "3\n4\n5\n");

        assert!(output.contains("No expenses to edit."));
        assert!(output.contains("No expenses to delete."));
    }

    #[test]
    fn test_delete_flow() {
        let temp_dir = TempDir::new().unwrap();
        let script = "1\n1\nA\n\n1\n2\nB\n\n4\n1\n5\n";
        let (service, output) = run_script(&temp_dir, script);

        assert!(output.contains("Expense deleted successfully!"));
        assert_eq!(service.ledger().len(), 1);
        assert_eq!(service.ledger().get(1).unwrap().category, "B");
    }

    #[test]
    fn test_delete_cancel_and_bad_index() {
        let temp_dir = TempDir::new().unwrap();
        let script = "1\n1\nA\n\n4\n0\n4\n7\n4\n-1\n4\nx\n5\n";
        let (service, output) = run_script(&temp_dir, script);

        assert_eq!(output.matches("Invalid number. Please try again.").count(), 2);
        assert!(output.contains("Invalid input. Please enter a valid number."));
        assert!(!output.contains("Expense deleted successfully!"));
        assert_eq!(service.ledger().len(), 1);
    }

    #[test]
    fn test_amount_with_configured_symbol() {
        let temp_dir = TempDir::new().unwrap();
        let (service, output) = run_script(&temp_dir, "1\n₹12.50\nFood\n\n1\n$5\n5\n");

        assert!(output.contains("Invalid input for amount: Invalid amount: '$5'"));
        assert_eq!(service.ledger().len(), 1);
        assert_eq!(service.ledger().get(1).unwrap().amount, Money::from_cents(1250));
    }

    #[test]
    fn test_summary_overflow_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let big = "50000000000000000000000000000";
        let script = format!("1\n{big}\nA\n\n1\n{big}\nB\n\n2\n5\n");
        let (service, output) = run_script(&temp_dir, &script);

        assert_eq!(service.ledger().len(), 2);
        assert!(output.contains("Error: Amount out of range"));
        assert!(!output.contains("Total spent"));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_sub_cent_amounts_add_up() {
        let temp_dir = TempDir::new().unwrap();
        let add = "1\n0.335\nSnacks\n2024-01-01\n";
        let script = format!("{add}{add}{add}2\n5\n");
        let (_, output) = run_script(&temp_dir, &script);

        assert!(output.contains("Total spent: ₹1.01"));
        let saved = std::fs::read_to_string(temp_dir.path().join("expenses.csv")).unwrap();
        assert!(saved.contains("0.335,Snacks,2024-01-01"));
    }
}
