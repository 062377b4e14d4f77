//! Integration tests for the full ingestion and analysis pipeline
//!
//! These tests use fixture files in `tests/fixtures/` to verify the
//! end-to-end CSV-to-analysis-results flow.
//!
//! Fixture data: Widget (P1) at 10.00, Gadget (P2) at 2.50, one product
//! row with an empty price; stores Paris (1) and Lyon (2); four sale
//! rows of which one references a nonexistent store and one has a
//! non-numeric quantity.

use std::path::PathBuf;
use ventes_core::config::SourcePaths;
use ventes_core::{pipeline, Database};

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn fixture_sources() -> SourcePaths {
    SourcePaths {
        products: fixture_path("produit.csv"),
        stores: fixture_path("magasin.csv"),
        sales: fixture_path("vent.csv"),
    }
}

fn result_text<'a>(
    results: &'a [ventes_core::AnalysisResult],
    name: &str,
) -> Option<&'a str> {
    results
        .iter()
        .find(|r| r.analysis_name == name)
        .map(|r| r.result.as_str())
}

#[test]
fn test_full_pipeline() {
    ventes_core::logging::init_test();

    let db = Database::open_in_memory().unwrap();
    let outcome = pipeline::run(&db, &fixture_sources()).expect("pipeline should succeed");

    // Products: P3 has an empty price and is skipped, not defaulted
    assert_eq!(outcome.ingest.products.rows_read, 3);
    assert_eq!(outcome.ingest.products.rows_inserted, 2);
    assert_eq!(outcome.ingest.products.rows_skipped(), 1);

    assert_eq!(outcome.ingest.stores.rows_inserted, 2);

    // Sales: the "abc" quantity row is skipped, the dangling store row kept
    assert_eq!(outcome.ingest.sales.rows_read, 4);
    assert_eq!(outcome.ingest.sales.rows_inserted, 3);
    assert_eq!(outcome.ingest.sales.rows_skipped(), 1);

    // 3*10.00 + 4*2.50 + 1*10.00 = 50.00
    assert_eq!(
        result_text(&outcome.results, "Total Revenue"),
        Some("Total Revenue: 50.00 EUR")
    );
    assert_eq!(
        result_text(&outcome.results, "Sales by Product - Widget"),
        Some("Quantity Sold: 4, Revenue: 40.00 EUR")
    );
    assert_eq!(
        result_text(&outcome.results, "Sales by Product - Gadget"),
        Some("Quantity Sold: 4, Revenue: 10.00 EUR")
    );

    // Per-city excludes the sale to the nonexistent store 99
    assert_eq!(
        result_text(&outcome.results, "Sales by City - Paris"),
        Some("Total Revenue: 30.00 EUR")
    );
    assert_eq!(
        result_text(&outcome.results, "Sales by City - Lyon"),
        Some("Total Revenue: 10.00 EUR")
    );
    assert!(result_text(&outcome.results, "Sales by City - 99").is_none());
}

#[test]
fn test_rerun_accumulates_results_but_not_entities() {
    let db = Database::open_in_memory().unwrap();
    let sources = fixture_sources();

    let first = pipeline::run(&db, &sources).unwrap();
    let first_count = first.results.len() as i64;
    assert_eq!(db.count_analysis_results().unwrap(), first_count);

    let second = pipeline::run(&db, &sources).unwrap();

    // Keyed relations are idempotent; results are append-only
    assert_eq!(db.count_products().unwrap(), 2);
    assert_eq!(db.count_stores().unwrap(), 2);
    assert_eq!(db.count_analysis_results().unwrap(), first_count * 2);
    assert_eq!(second.results.len() as i64, first_count * 2);

    // Second run re-ingested nothing into the keyed relations
    assert_eq!(second.ingest.products.rows_inserted, 0);
    assert_eq!(second.ingest.products.duplicates, 2);
    assert_eq!(second.ingest.stores.rows_inserted, 0);
}

#[test]
fn test_empty_sales_yields_no_value() {
    let db = Database::open_in_memory().unwrap();
    let sources = SourcePaths {
        products: fixture_path("produit.csv"),
        stores: fixture_path("magasin.csv"),
        sales: fixture_path("vent-empty.csv"),
    };

    let outcome = pipeline::run(&db, &sources).expect("empty sales must not fail");

    assert_eq!(
        result_text(&outcome.results, "Total Revenue"),
        Some("Total Revenue: no value")
    );

    // No per-product or per-city rows at all
    assert_eq!(outcome.results.len(), 1);
}

#[test]
fn test_missing_source_aborts_run() {
    let db = Database::open_in_memory().unwrap();
    let sources = SourcePaths {
        products: fixture_path("does-not-exist.csv"),
        stores: fixture_path("magasin.csv"),
        sales: fixture_path("vent.csv"),
    };

    let err = pipeline::run(&db, &sources).unwrap_err();
    assert!(err.to_string().contains("products"));

    // Later steps never ran
    assert_eq!(db.count_stores().unwrap(), 0);
    assert_eq!(db.count_analysis_results().unwrap(), 0);
}

#[test]
fn test_pipeline_on_disk_database() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("sales_data.db");

    {
        let db = Database::open(&db_path).unwrap();
        pipeline::run(&db, &fixture_sources()).unwrap();
    }

    // Reopen and verify persisted state
    let db = Database::open(&db_path).unwrap();
    assert_eq!(db.count_products().unwrap(), 2);
    assert!(db.count_analysis_results().unwrap() > 0);
}
