//! Row-level field extraction and type coercion
//!
//! Fields are extracted by header name, not position. Decimal fields
//! accept a locale-style comma as the decimal separator; surrounding
//! whitespace is trimmed before parsing. Empty numeric fields fail
//! coercion rather than defaulting to zero.

use csv::StringRecord;
use std::collections::HashMap;
use thiserror::Error;

/// Why a single row was rejected. Row errors never abort the batch;
/// they are collected into the source report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    /// The expected column is absent from the header row
    #[error("column {0:?} not found in header")]
    MissingColumn(String),

    /// The row is shorter than the header
    #[error("row has no value for column {0:?}")]
    MissingField(String),

    /// A required numeric field is empty or whitespace-only
    #[error("empty value for column {0:?}")]
    EmptyField(String),

    /// A numeric field failed to parse
    #[error("invalid number in column {column:?}: {value:?}")]
    InvalidNumber { column: String, value: String },

    /// The CSV reader could not decode the row at all
    #[error("unreadable row: {0}")]
    Malformed(String),
}

/// Header-name to column-index lookup for one source file.
pub struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    /// Build the lookup from the source's header record.
    pub fn from_headers(headers: &StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        Self { index }
    }

    /// Get a required field by column name.
    pub fn get<'r>(&self, record: &'r StringRecord, column: &str) -> Result<&'r str, RowError> {
        let idx = self
            .index
            .get(column)
            .ok_or_else(|| RowError::MissingColumn(column.to_string()))?;
        record
            .get(*idx)
            .ok_or_else(|| RowError::MissingField(column.to_string()))
    }

    /// Get an optional field; `None` when the column is absent entirely.
    pub fn get_optional<'r>(&self, record: &'r StringRecord, column: &str) -> Option<&'r str> {
        self.index.get(column).and_then(|idx| record.get(*idx))
    }
}

/// Coerce a decimal field. A comma may stand in for the decimal point
/// ("12,50" parses as 12.50).
pub fn parse_decimal(column: &str, raw: &str) -> Result<f64, RowError> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return Err(RowError::EmptyField(column.to_string()));
    }
    cleaned.parse().map_err(|_| RowError::InvalidNumber {
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Coerce an integer field.
pub fn parse_integer(column: &str, raw: &str) -> Result<i64, RowError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RowError::EmptyField(column.to_string()));
    }
    trimmed.parse().map_err(|_| RowError::InvalidNumber {
        column: column.to_string(),
        value: raw.to_string(),
    })
}
