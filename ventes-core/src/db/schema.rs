//! Database schema and migrations
//!
//! Uses SQLite with embedded migrations managed via PRAGMA user_version.

use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: Initial schema
    r#"
    -- Relation and column names are an external contract: other tools
    -- read this store by these names.

    CREATE TABLE IF NOT EXISTS products (
        product_id     TEXT PRIMARY KEY,
        product_name   TEXT NOT NULL,
        price          REAL NOT NULL,
        stock          INTEGER
    );

    CREATE TABLE IF NOT EXISTS stores (
        store_id       INTEGER PRIMARY KEY,
        city           TEXT NOT NULL,
        employee_count INTEGER NOT NULL
    );

    -- No primary key: duplicate sale rows are indistinguishable and both
    -- are kept. The foreign keys are declarative only; dangling references
    -- are permitted and drop out of the aggregation joins.
    CREATE TABLE IF NOT EXISTS sales (
        sale_date      TEXT NOT NULL,
        product_id     TEXT NOT NULL,
        quantity       INTEGER NOT NULL,
        store_id       INTEGER,
        FOREIGN KEY (product_id) REFERENCES products (product_id),
        FOREIGN KEY (store_id) REFERENCES stores (store_id)
    );

    -- Append-only; accumulates across runs, never cleared.
    CREATE TABLE IF NOT EXISTS analysis_results (
        id             INTEGER PRIMARY KEY,
        analysis_name  TEXT,
        result         TEXT
    );
    "#,
];

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> crate::error::Result<()> {
    let current_version: i32 = conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .unwrap_or(0);

    tracing::info!(
        current_version,
        target_version = SCHEMA_VERSION,
        "Checking database migrations"
    );

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i32;
        if version > current_version {
            tracing::info!(version, "Running migration");
            conn.execute_batch(migration)?;
            conn.execute(&format!("PRAGMA user_version = {}", version), [])?;
        }
    }

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> crate::error::Result<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    Ok(version)
}
