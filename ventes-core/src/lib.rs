//! # ventes-core
//!
//! Core library for ventes - a sales CSV ingestion and analysis pipeline.
//!
//! This library provides:
//! - Typed domain records for products, stores and sales
//! - A SQLite storage layer with versioned schema creation
//! - A row ingestor with per-row error isolation
//! - Read-only revenue aggregations and a persisted result store
//!
//! ## Architecture
//!
//! Data flows through three layers:
//! - **Sources:** flat CSV files with named columns (immutable input)
//! - **Relations:** normalized SQLite tables (products, stores, sales)
//! - **Results:** named analysis outcomes, appended per run
//!
//! ## Example
//!
//! ```rust,no_run
//! use ventes_core::{pipeline, Config, Database};
//!
//! let config = Config::load().expect("failed to load config");
//! let db = Database::open(&config.storage.database_path()).expect("failed to open database");
//! let outcome = pipeline::run(&db, &config.sources).expect("pipeline failed");
//! for result in &outcome.results {
//!     println!("- {}: {}", result.analysis_name, result.result);
//! }
//! ```

// Re-export commonly used items at the crate root
pub use config::{Config, SourcePaths};
pub use db::Database;
pub use error::{Error, Result};
pub use ingest::{IngestReport, Ingestor, SourceReport};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod ingest;
pub mod logging;
pub mod pipeline;
pub mod types;
