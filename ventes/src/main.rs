//! ventes - import sales CSV data and compute revenue analyses
//!
//! Reads the three tabular sources (products, stores, sales), loads them
//! into a SQLite store, and records total revenue, revenue by product and
//! revenue by city as named analysis results.
//!
//! Uses XDG Base Directory specification for file locations:
//! - Database: $XDG_DATA_HOME/ventes/sales_data.db
//! - Config: $XDG_CONFIG_HOME/ventes/config.toml

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use ventes_core::{pipeline, Config, Database};

#[derive(Parser)]
#[command(name = "ventes")]
#[command(about = "Import sales CSV data and compute revenue analyses")]
#[command(version)]
struct Args {
    /// Path to the config file (default: $XDG_CONFIG_HOME/ventes/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Database file (overrides config)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Products CSV source (overrides config)
    #[arg(long)]
    products: Option<PathBuf>,

    /// Stores CSV source (overrides config)
    #[arg(long)]
    stores: Option<PathBuf>,

    /// Sales CSV source (overrides config)
    #[arg(long)]
    sales: Option<PathBuf>,

    /// Print per-row failures after the summary
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    ventes_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let mut sources = config.sources.clone();
    if let Some(path) = args.products {
        sources.products = path;
    }
    if let Some(path) = args.stores {
        sources.stores = path;
    }
    if let Some(path) = args.sales {
        sources.sales = path;
    }

    let db_path = args
        .database
        .unwrap_or_else(|| config.storage.database_path());

    tracing::info!(path = %db_path.display(), "Opening database");
    println!("Database: {}", db_path.display());

    let db = Database::open(&db_path).context("failed to open database")?;

    let outcome = pipeline::run(&db, &sources).context("pipeline failed")?;

    println!("\nImport complete:");
    for report in outcome.ingest.sources() {
        println!(
            "  {}: {} read, {} inserted, {} skipped, {} duplicates",
            report.kind,
            report.rows_read,
            report.rows_inserted,
            report.rows_skipped(),
            report.duplicates
        );
    }

    if args.verbose {
        for report in outcome.ingest.sources() {
            for failure in &report.failures {
                println!("  {} line {}: {}", report.kind, failure.line, failure.error);
            }
        }
    }

    println!();
    if outcome.results.is_empty() {
        println!("No analysis results found.");
    } else {
        println!("Analysis Results:");
        for result in &outcome.results {
            println!("- {}: {}", result.analysis_name, result.result);
        }
    }

    Ok(())
}
