use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use fintrack::cli::{
    handle_add, handle_categories, handle_export, handle_list, handle_report_command, AddArgs,
    ExportArgs, ListArgs, ReportCommands,
};
use fintrack::config::{paths::TrackerPaths, settings::Settings};
use fintrack::logging::init_tracing;
use fintrack::storage::{initialize_storage, TransactionStore};

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker backed by a single CSV file",
    long_about = "fintrack records everyday spending in a CSV file and shows \
                  where the money went, by category and by month."
)]
struct Cli {
    /// Transaction file to use instead of the configured one
    #[arg(short, long, global = true, env = "FINTRACK_FILE")]
    file: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a transaction
    Add(AddArgs),

    /// List recent transactions
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show the available categories
    Categories,

    /// Spending reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export all transactions to a CSV file
    Export(ExportArgs),

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let data_file = settings.transactions_file(&paths, cli.file);

    match cli.command {
        Some(Commands::Add(args)) => {
            // A file that fails to load must not be overwritten
            let mut store = TransactionStore::open(&data_file)?;
            report_skipped(&store);
            handle_add(&mut store, &settings, args)?;
        }
        Some(Commands::List(args)) => {
            let store = open_lenient(data_file);
            handle_list(&store, &settings, args)?;
        }
        Some(Commands::Categories) => {
            let store = open_lenient(data_file);
            handle_categories(&store, &settings)?;
        }
        Some(Commands::Report(cmd)) => {
            let store = open_lenient(data_file);
            handle_report_command(&store, &settings, cmd)?;
        }
        Some(Commands::Export(args)) => {
            let store = TransactionStore::open(&data_file)?;
            report_skipped(&store);
            handle_export(&store, args)?;
        }
        Some(Commands::Init) => {
            if initialize_storage(&paths)? {
                println!("Initialized fintrack at: {}", paths.base_dir().display());
            } else {
                println!("fintrack is already initialized at: {}", paths.base_dir().display());
            }
            println!("Transactions are stored in: {}", data_file.display());
        }
        Some(Commands::Config) => {
            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Transaction file:  {}", data_file.display());
            println!();
            println!("Settings:");
            println!("  Currency label: {}", settings.currency_label);
            println!("  Chart width:    {}", settings.chart.bar_width);
        }
        None => {
            println!("fintrack - personal finance tracker");
            println!();
            println!("Run 'fintrack --help' for usage information.");
        }
    }

    Ok(())
}

/// Open for reading, showing an empty store if the file cannot be loaded
fn open_lenient(path: PathBuf) -> TransactionStore {
    let (store, error) = TransactionStore::open_or_empty(path);
    if let Some(e) = error {
        eprintln!("Warning: could not load {}: {}", store.path().display(), e);
    }
    report_skipped(&store);
    store
}

fn report_skipped(store: &TransactionStore) {
    let skipped = store.skipped_rows().len();
    if skipped > 0 {
        eprintln!(
            "Note: skipped {} unreadable row(s) in {}",
            skipped,
            store.path().display()
        );
    }
}
