//! Database repository layer
//!
//! Provides insert and query operations for all entity types. One
//! `Database` handle is created per pipeline run and passed explicitly
//! to each component; the connection is never held across steps.

use crate::error::{Error, Result};
use crate::types::{AnalysisResult, Product, Sale, Store};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::Mutex;

/// Database handle wrapping a single connection
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Foreign keys stay off: sale rows may reference products or
        // stores that were never ingested.
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        super::schema::run_migrations(&conn)
    }

    /// Get the underlying connection (for advanced use)
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }

    // ============================================
    // Product operations
    // ============================================

    /// Insert a batch of products in one transaction, skipping identifiers
    /// that already exist. Returns the number of rows actually inserted.
    pub fn insert_products(&self, products: &[Product]) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO products (product_id, product_name, price, stock)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )?;
            for product in products {
                inserted +=
                    stmt.execute(params![product.id, product.name, product.price, product.stock])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Count rows in the products relation
    pub fn count_products(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM products", [], |r| r.get(0))?;
        Ok(count)
    }

    // ============================================
    // Store operations
    // ============================================

    /// Insert a batch of stores in one transaction, skipping identifiers
    /// that already exist. Returns the number of rows actually inserted.
    pub fn insert_stores(&self, stores: &[Store]) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO stores (store_id, city, employee_count)
                VALUES (?1, ?2, ?3)
                "#,
            )?;
            for store in stores {
                inserted += stmt.execute(params![store.id, store.city, store.employee_count])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Count rows in the stores relation
    pub fn count_stores(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM stores", [], |r| r.get(0))?;
        Ok(count)
    }

    // ============================================
    // Sale operations
    // ============================================

    /// Append a batch of sales in one transaction. Sales have no
    /// identifier, so every row is inserted unconditionally.
    pub fn insert_sales(&self, sales: &[Sale]) -> Result<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO sales (sale_date, product_id, quantity, store_id)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )?;
            for sale in sales {
                stmt.execute(params![
                    sale.sale_date,
                    sale.product_id,
                    sale.quantity,
                    sale.store_id
                ])?;
            }
        }
        tx.commit()?;
        Ok(sales.len())
    }

    /// Count rows in the sales relation
    pub fn count_sales(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM sales", [], |r| r.get(0))?;
        Ok(count)
    }

    // ============================================
    // Analysis result operations
    // ============================================

    /// Append one analysis result row. Never overwrites or deduplicates
    /// by name; the relation accumulates across runs.
    pub fn record_analysis(&self, analysis_name: &str, result: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO analysis_results (analysis_name, result)
            VALUES (?1, ?2)
            "#,
            params![analysis_name, result],
        )?;
        Ok(())
    }

    /// List every stored analysis result in primary-key order
    pub fn list_analysis_results(&self) -> Result<Vec<AnalysisResult>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, analysis_name, result FROM analysis_results ORDER BY id")?;

        let results = stmt
            .query_map([], Self::row_to_analysis_result)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)?;

        Ok(results)
    }

    /// Count rows in the analysis_results relation
    pub fn count_analysis_results(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM analysis_results", [], |r| r.get(0))?;
        Ok(count)
    }

    fn row_to_analysis_result(row: &Row) -> rusqlite::Result<AnalysisResult> {
        Ok(AnalysisResult {
            id: row.get("id")?,
            analysis_name: row.get::<_, Option<String>>("analysis_name")?.unwrap_or_default(),
            result: row.get::<_, Option<String>>("result")?.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.migrate().unwrap();
        db
    }

    fn widget(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: "Widget".to_string(),
            price,
            stock: Some(5),
        }
    }

    #[test]
    fn test_insert_products_skips_duplicates() {
        let db = test_db();

        let inserted = db.insert_products(&[widget("P1", 10.0)]).unwrap();
        assert_eq!(inserted, 1);

        // Same identifier again: silent no-op, existing row wins
        let inserted = db.insert_products(&[widget("P1", 99.0)]).unwrap();
        assert_eq!(inserted, 0);
        assert_eq!(db.count_products().unwrap(), 1);

        let price: f64 = db
            .connection()
            .query_row("SELECT price FROM products WHERE product_id = 'P1'", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(price, 10.0);
    }

    #[test]
    fn test_insert_stores_skips_duplicates() {
        let db = test_db();
        let store = Store {
            id: 1,
            city: "Paris".to_string(),
            employee_count: 20,
        };

        assert_eq!(db.insert_stores(&[store.clone()]).unwrap(), 1);
        assert_eq!(db.insert_stores(&[store]).unwrap(), 0);
        assert_eq!(db.count_stores().unwrap(), 1);
    }

    #[test]
    fn test_insert_sales_keeps_duplicates() {
        let db = test_db();
        let sale = Sale {
            sale_date: "2024-01-01".to_string(),
            product_id: "P1".to_string(),
            quantity: 3,
            store_id: Some(1),
        };

        db.insert_sales(&[sale.clone(), sale]).unwrap();
        assert_eq!(db.count_sales().unwrap(), 2);
    }

    #[test]
    fn test_sale_with_null_store() {
        let db = test_db();
        let sale = Sale {
            sale_date: "2024-01-02".to_string(),
            product_id: "P2".to_string(),
            quantity: 1,
            store_id: None,
        };

        db.insert_sales(&[sale]).unwrap();

        let store_id: Option<i64> = db
            .connection()
            .query_row("SELECT store_id FROM sales", [], |r| r.get(0))
            .unwrap();
        assert_eq!(store_id, None);
    }

    #[test]
    fn test_analysis_results_append_only() {
        let db = test_db();

        db.record_analysis("Total Revenue", "Total Revenue: 30.00 EUR")
            .unwrap();
        db.record_analysis("Total Revenue", "Total Revenue: 30.00 EUR")
            .unwrap();

        let results = db.list_analysis_results().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].analysis_name, "Total Revenue");
        assert!(results[0].id < results[1].id);
    }
}
