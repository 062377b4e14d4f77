//! Domain types for the sales data model
//!
//! Each struct maps to one row in its relation. These are produced by the
//! validating parse step in [`crate::ingest`] and written through
//! [`crate::db::Database`]; raw CSV rows never leave the ingest layer.

use std::fmt;

/// Which tabular source a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Products,
    Stores,
    Sales,
}

impl SourceKind {
    /// Stable lowercase name, used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Products => "products",
            SourceKind::Stores => "stores",
            SourceKind::Sales => "sales",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product, keyed by its reference identifier.
///
/// Never updated or deleted once ingested; re-ingesting the same
/// identifier is a silent no-op (existing row wins).
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Unique product reference (primary key)
    pub id: String,
    /// Display name
    pub name: String,
    /// Unit price; coerced from locale-style decimal input
    pub price: f64,
    /// Stock quantity (nullable in the store)
    pub stock: Option<i64>,
}

/// A store, keyed by its integer identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    /// Unique store identifier (primary key)
    pub id: i64,
    /// City the store operates in
    pub city: String,
    /// Employee headcount
    pub employee_count: i64,
}

/// A single sale line.
///
/// Sales have no primary key: duplicate rows are indistinguishable and
/// both are kept. References to products and stores are not enforced;
/// dangling identifiers simply produce no match in the aggregation joins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    /// Sale date, stored as-is (format unvalidated)
    pub sale_date: String,
    /// Product reference
    pub product_id: String,
    /// Units sold
    pub quantity: i64,
    /// Store reference, if the source carried one
    pub store_id: Option<i64>,
}

/// A persisted analysis outcome.
///
/// Rows are append-only and accumulate across runs; names are not unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Auto-incrementing identifier
    pub id: i64,
    /// Analysis name (e.g. "Total Revenue")
    pub analysis_name: String,
    /// Human-readable result text
    pub result: String,
}
