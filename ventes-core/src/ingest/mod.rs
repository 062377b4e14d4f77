//! Ingestion layer for the three tabular sources
//!
//! This module reads each CSV source, coerces rows into typed entities,
//! and writes them through the repository layer. Each source is committed
//! as a single transaction once all of its readable rows are processed.
//!
//! ## Error handling
//!
//! - Individual row failures (missing field, bad number, unreadable line)
//!   are logged as warnings and collected into the [`SourceReport`];
//!   the batch always completes.
//! - Duplicate product/store identifiers are silent no-ops (existing row
//!   wins) and are counted in the report.
//! - Only storage-level failures (cannot open the source, cannot write
//!   the database) return `Err` and abort the run.

mod row;
pub mod sources;

pub use row::{Columns, RowError};

use crate::config::SourcePaths;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::types::SourceKind;
use csv::StringRecord;
use std::path::Path;

/// One rejected row: where it was and why it was skipped.
#[derive(Debug, Clone)]
pub struct RowFailure {
    /// 1-based line number in the source file (0 when unknown)
    pub line: u64,
    /// Why the row was rejected
    pub error: RowError,
}

/// Outcome of ingesting a single source.
#[derive(Debug)]
pub struct SourceReport {
    /// Which source this report covers
    pub kind: SourceKind,
    /// Rows read from the file (excluding the header)
    pub rows_read: usize,
    /// Rows actually inserted
    pub rows_inserted: usize,
    /// Rows ignored because their identifier already existed
    pub duplicates: usize,
    /// Rows skipped with their failure reasons
    pub failures: Vec<RowFailure>,
}

impl SourceReport {
    fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            rows_read: 0,
            rows_inserted: 0,
            duplicates: 0,
            failures: Vec::new(),
        }
    }

    /// Number of rows skipped due to row-level failures.
    pub fn rows_skipped(&self) -> usize {
        self.failures.len()
    }
}

/// Aggregate report across all three sources.
#[derive(Debug)]
pub struct IngestReport {
    pub products: SourceReport,
    pub stores: SourceReport,
    pub sales: SourceReport,
}

impl IngestReport {
    /// Total rows inserted across all sources.
    pub fn total_inserted(&self) -> usize {
        self.products.rows_inserted + self.stores.rows_inserted + self.sales.rows_inserted
    }

    /// Total rows skipped across all sources.
    pub fn total_skipped(&self) -> usize {
        self.products.rows_skipped() + self.stores.rows_skipped() + self.sales.rows_skipped()
    }

    /// Per-source reports in ingestion order.
    pub fn sources(&self) -> [&SourceReport; 3] {
        [&self.products, &self.stores, &self.sales]
    }
}

/// Reads the tabular sources and writes them through the injected
/// database handle.
pub struct Ingestor<'a> {
    db: &'a Database,
}

impl<'a> Ingestor<'a> {
    /// Create an ingestor over an open database.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Ingest all three sources in order: products, stores, sales.
    pub fn ingest_all(&self, paths: &SourcePaths) -> Result<IngestReport> {
        let products = self.ingest_products(&paths.products)?;
        let stores = self.ingest_stores(&paths.stores)?;
        let sales = self.ingest_sales(&paths.sales)?;

        Ok(IngestReport {
            products,
            stores,
            sales,
        })
    }

    /// Ingest the product source.
    pub fn ingest_products(&self, path: &Path) -> Result<SourceReport> {
        let (rows, mut report) = read_source(SourceKind::Products, path, sources::parse_product)?;
        report.rows_inserted = self.db.insert_products(&rows)?;
        report.duplicates = rows.len() - report.rows_inserted;
        log_source_report(&report);
        Ok(report)
    }

    /// Ingest the store source.
    pub fn ingest_stores(&self, path: &Path) -> Result<SourceReport> {
        let (rows, mut report) = read_source(SourceKind::Stores, path, sources::parse_store)?;
        report.rows_inserted = self.db.insert_stores(&rows)?;
        report.duplicates = rows.len() - report.rows_inserted;
        log_source_report(&report);
        Ok(report)
    }

    /// Ingest the sales source. Sales have no identifier, so every
    /// coerced row is appended.
    pub fn ingest_sales(&self, path: &Path) -> Result<SourceReport> {
        let (rows, mut report) = read_source(SourceKind::Sales, path, sources::parse_sale)?;
        report.rows_inserted = self.db.insert_sales(&rows)?;
        log_source_report(&report);
        Ok(report)
    }
}

/// Read a source file and coerce every row, collecting failures.
///
/// Returns the successfully coerced rows plus a report covering the
/// rejected ones. A file that cannot be opened is fatal.
fn read_source<T, F>(kind: SourceKind, path: &Path, parse: F) -> Result<(Vec<T>, SourceReport)>
where
    F: Fn(&Columns, &StringRecord) -> std::result::Result<T, RowError>,
{
    let mut report = SourceReport::new(kind);

    let mut reader = csv::Reader::from_path(path).map_err(|e| Error::Ingest {
        kind: kind.to_string(),
        message: format!("cannot open {}: {}", path.display(), e),
    })?;

    let columns = Columns::from_headers(reader.headers()?);
    let mut rows = Vec::new();

    for record in reader.records() {
        report.rows_read += 1;

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                let failure = RowFailure {
                    line: e.position().map(|p| p.line()).unwrap_or(0),
                    error: RowError::Malformed(e.to_string()),
                };
                tracing::warn!(
                    source = %kind,
                    line = failure.line,
                    error = %failure.error,
                    "Skipping unreadable row"
                );
                report.failures.push(failure);
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        match parse(&columns, &record) {
            Ok(row) => rows.push(row),
            Err(error) => {
                tracing::warn!(source = %kind, line, error = %error, "Skipping malformed row");
                report.failures.push(RowFailure { line, error });
            }
        }
    }

    Ok((rows, report))
}

fn log_source_report(report: &SourceReport) {
    tracing::info!(
        source = %report.kind,
        read = report.rows_read,
        inserted = report.rows_inserted,
        skipped = report.rows_skipped(),
        duplicates = report.duplicates,
        "Source ingested"
    );
}
