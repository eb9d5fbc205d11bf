use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration::ConnectionMode;
use database::{DbRepository, PgStore};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod console;

use console::Console;

/// The main entry point for the movie review console.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Load configuration once and keep it for the life of the process
    let mut config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(mode) = cli.connection_mode {
        config.database.mode = mode;
    }
    let config = configuration::init(config)?;
    let _log_guard = configuration::init_tracing(&config.log)?;

    // The store connects lazily, so an unreachable database surfaces on first use
    let store = Arc::new(database::connect(&config.database)?);

    let result = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => handle_shell(store.clone()).await,
        Commands::Migrate => handle_migrate(&store).await,
        Commands::Check => handle_check(store.clone()).await,
    };

    store.close().await;
    result
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A terminal client for the movie review database.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./moviedb.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides `database.mode` from the configuration.
    #[arg(long, global = true, value_enum)]
    connection_mode: Option<ConnectionMode>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive login session (default).
    Shell,
    /// Create the reference tables and stored procedures.
    Migrate,
    /// Verify that the database can be reached.
    Check,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

async fn handle_shell(store: Arc<PgStore>) -> Result<()> {
    let repo = DbRepository::new(store);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut console = Console::new(repo, stdin, std::io::stdout());
    if std::io::stdin().is_terminal() {
        console = console.hiding_password();
    }
    console.run().await
}

async fn handle_migrate(store: &PgStore) -> Result<()> {
    let spinner = spinner("Applying migrations...")?;
    let outcome = store.run_migrations().await;
    match &outcome {
        Ok(()) => spinner.finish_with_message("Migrations applied."),
        Err(_) => spinner.abandon_with_message("Migrations failed."),
    }
    outcome.context("Failed to run database migrations")
}

async fn handle_check(store: Arc<PgStore>) -> Result<()> {
    let spinner = spinner("Connecting to the database...")?;
    let outcome = DbRepository::new(store).ping().await;
    match &outcome {
        Ok(()) => spinner.finish_with_message("Database connection OK."),
        Err(_) => spinner.abandon_with_message("Database unreachable."),
    }
    outcome.context("Database check failed")
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}
