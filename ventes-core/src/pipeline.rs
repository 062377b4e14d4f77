//! Pipeline driver
//!
//! Sequences the whole run: migrate the schema, ingest the three sources,
//! compute the aggregations, and persist each outcome as a named analysis
//! result. Every step failure is fatal; no step is retried.

use crate::analytics;
use crate::config::SourcePaths;
use crate::db::Database;
use crate::error::Result;
use crate::format::format_eur;
use crate::ingest::{IngestReport, Ingestor};
use crate::types::AnalysisResult;

/// Everything a caller needs to report on one pipeline run.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Per-source ingestion reports
    pub ingest: IngestReport,
    /// Every stored analysis result, including rows from prior runs
    pub results: Vec<AnalysisResult>,
}

/// Run the full pipeline against an open database.
pub fn run(db: &Database, sources: &SourcePaths) -> Result<PipelineOutcome> {
    db.migrate()?;

    let ingest = Ingestor::new(db).ingest_all(sources)?;

    // Total revenue: the empty sum is stored as "no value", not an error
    match analytics::total_revenue(db)? {
        Some(total) => db.record_analysis(
            "Total Revenue",
            &format!("Total Revenue: {}", format_eur(total)),
        )?,
        None => db.record_analysis("Total Revenue", "Total Revenue: no value")?,
    }

    for row in analytics::revenue_by_product(db)? {
        db.record_analysis(
            &format!("Sales by Product - {}", row.product_name),
            &format!(
                "Quantity Sold: {}, Revenue: {}",
                row.total_quantity,
                format_eur(row.total_revenue)
            ),
        )?;
    }

    for row in analytics::revenue_by_city(db)? {
        db.record_analysis(
            &format!("Sales by City - {}", row.city),
            &format!("Total Revenue: {}", format_eur(row.total_revenue)),
        )?;
    }

    let results = db.list_analysis_results()?;

    tracing::info!(
        rows_inserted = ingest.total_inserted(),
        rows_skipped = ingest.total_skipped(),
        results_stored = results.len(),
        "Pipeline complete"
    );

    Ok(PipelineOutcome { ingest, results })
}
