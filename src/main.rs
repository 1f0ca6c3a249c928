use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use expense_tracker::audit::AuditLogger;
use expense_tracker::cli::run_menu;
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::services::ExpenseService;
use expense_tracker::storage::ExpenseStore;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "Records expenses in a CSV file, summarizes spending by category \
                  and draws a bar chart of where the money went. Run without a \
                  subcommand to start the interactive menu."
)]
struct Cli {
    /// Directory holding settings, expenses and the audit log
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Expenses CSV file to use instead of the one in the data directory
    #[arg(long, global = true, value_name = "FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default settings and an empty expenses file
    Init,

    /// Show current configuration and paths
    Config,

    /// List recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value_t = 20)]
        recent: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut paths = match cli.data_dir {
        Some(dir) => ExpensePaths::with_base_dir(dir),
        None => ExpensePaths::new()?,
    };
    if let Some(file) = cli.file {
        paths = paths.with_expenses_file(file);
    }
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing expense tracker at: {}", paths.base_dir().display());
            settings.save(&paths)?;

            let store = ExpenseStore::new(paths.expenses_file());
            if !store.path().exists() {
                store.save(&[])?;
            }
            println!("Initialization complete!");
        }
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Expenses file:  {}", paths.expenses_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Initialized:    {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Chart width:     {}", settings.chart_width);
            println!("  Chart mode:      {:?}", settings.chart_mode);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        Some(Commands::Audit { recent }) => {
            let entries = AuditLogger::new(paths.audit_log()).read_recent(recent)?;
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry.summary_line());
            }
        }
        None => {
            paths.ensure_directories()?;

            let store = ExpenseStore::new(paths.expenses_file());
            let audit = settings
                .audit_enabled
                .then(|| AuditLogger::new(paths.audit_log()));
            let mut service = ExpenseService::open(store, audit)
                .with_context(|| format!("Failed to load {}", paths.expenses_file().display()))?;

            let stdin = io::stdin();
            let stdout = io::stdout();
            run_menu(&mut service, &settings, stdin.lock(), stdout.lock())?;
        }
    }

    Ok(())
}
