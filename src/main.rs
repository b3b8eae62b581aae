//! Corpdle - CLI
//!
//! Daily company guessing game with TUI and line modes.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use corpdle::{
    catalog::{Catalog, loader::load_from_file},
    commands::{run_audit, run_simple},
    core::StatsRecord,
    output::{print_audit_result, print_stats},
    session::{STATS_KEY, Session},
    storage::{FileStore, read_json},
};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "corpdle",
    about = "Guess the company of the day from progressively revealed hints",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Company catalog TSV file (default: bundled catalog)
    #[arg(short = 'c', long, global = true)]
    catalog: Option<PathBuf>,

    /// Save file location (default: local data directory)
    #[arg(short = 's', long, global = true)]
    store: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (line-based, no TUI)
    Simple,

    /// Show lifetime statistics
    Stats,

    /// Check the catalog for names players could confuse
    Audit {
        /// Report name pairs within this edit distance
        #[arg(short, long, default_value = "1")]
        threshold: usize,
    },
}

/// Load the catalog from the -c flag or the bundled table
fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let catalog = match path {
        Some(path) => {
            let companies = load_from_file(path)
                .with_context(|| format!("Failed to read catalog {}", path.display()))?;
            Catalog::new(companies)
        }
        None => Catalog::embedded(),
    };

    if catalog.is_empty() {
        bail!("Catalog contains no valid companies");
    }
    Ok(catalog)
}

fn open_store(path: Option<PathBuf>) -> Result<FileStore> {
    let path = path.unwrap_or_else(FileStore::default_path);
    FileStore::open(&path).with_context(|| format!("Failed to open save file {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = load_catalog(cli.catalog.as_deref())?;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => run_play_command(&catalog, cli.store),
        Commands::Simple => run_simple_command(&catalog, cli.store),
        Commands::Stats => run_stats_command(cli.store),
        Commands::Audit { threshold } => {
            run_audit_command(&catalog, threshold);
            Ok(())
        }
    }
}

fn run_play_command(catalog: &Catalog, store: Option<PathBuf>) -> Result<()> {
    use corpdle::interactive::{App, run_tui};

    let store = open_store(store)?;
    let session = Session::open(catalog, store, Utc::now(), &mut rand::rng())?;
    run_tui(App::new(session))
}

fn run_simple_command(catalog: &Catalog, store: Option<PathBuf>) -> Result<()> {
    let store = open_store(store)?;
    let mut session = Session::open(catalog, store, Utc::now(), &mut rand::rng())?;
    run_simple(&mut session)
}

fn run_stats_command(store: Option<PathBuf>) -> Result<()> {
    let store = open_store(store)?;
    let stats: StatsRecord = read_json(&store, STATS_KEY)
        .unwrap_or_else(|err| {
            warn!(%err, "ignoring unreadable statistics");
            None
        })
        .unwrap_or_default();
    print_stats(&stats, Utc::now());
    Ok(())
}

fn run_audit_command(catalog: &Catalog, threshold: usize) {
    println!(
        "Auditing {} company names (threshold {threshold})...",
        catalog.len()
    );
    let result = run_audit(catalog, threshold, true);
    print_audit_result(&result);
}
