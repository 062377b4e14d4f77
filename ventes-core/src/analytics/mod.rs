//! Aggregation queries over the ingested relations
//!
//! All three queries are read-only equi-joins between sales and products
//! (and stores, where city is involved). None mutates state, so they can
//! run in any order.

use crate::db::Database;
use crate::error::Result;

/// Revenue and quantity for one product name.
///
/// Grouping is by product *name*, not identifier: products sharing a
/// name are merged into one row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRevenue {
    pub product_name: String,
    pub total_quantity: i64,
    pub total_revenue: f64,
}

/// Revenue for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct CityRevenue {
    pub city: String,
    pub total_revenue: f64,
}

/// Total revenue over all sales, joined to products by identifier.
///
/// Returns `None` when there are no qualifying sales (the empty sum is
/// absent, not zero and not an error).
pub fn total_revenue(db: &Database) -> Result<Option<f64>> {
    let conn = db.connection();
    let total: Option<f64> = conn.query_row(
        r#"
        SELECT SUM(s.quantity * p.price)
        FROM sales s
        JOIN products p ON s.product_id = p.product_id
        "#,
        [],
        |row| row.get(0),
    )?;
    Ok(total)
}

/// Quantity and revenue per product name. Unordered across groups.
pub fn revenue_by_product(db: &Database) -> Result<Vec<ProductRevenue>> {
    let conn = db.connection();
    let mut stmt = conn.prepare(
        r#"
        SELECT p.product_name, SUM(s.quantity), SUM(s.quantity * p.price)
        FROM sales s
        JOIN products p ON s.product_id = p.product_id
        GROUP BY p.product_name
        "#,
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(ProductRevenue {
                product_name: row.get(0)?,
                total_quantity: row.get(1)?,
                total_revenue: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Revenue per store city. Inner-join semantics: sales with a NULL or
/// dangling store reference are excluded entirely.
pub fn revenue_by_city(db: &Database) -> Result<Vec<CityRevenue>> {
    let conn = db.connection();
    let mut stmt = conn.prepare(
        r#"
        SELECT m.city, SUM(s.quantity * p.price)
        FROM sales s
        JOIN stores m ON s.store_id = m.store_id
        JOIN products p ON s.product_id = p.product_id
        GROUP BY m.city
        "#,
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(CityRevenue {
                city: row.get(0)?,
                total_revenue: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
