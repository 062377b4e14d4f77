//! Per-source record parsers
//!
//! Each parser turns one raw CSV record into a typed domain entity, or a
//! [`RowError`] describing why the row must be skipped. Column names are
//! the original source-domain names and are part of the external contract.

use super::row::{parse_decimal, parse_integer, Columns, RowError};
use crate::types::{Product, Sale, Store};
use csv::StringRecord;

pub const COL_PRODUCT_ID: &str = "ID Référence produit";
pub const COL_PRODUCT_NAME: &str = "Nom";
pub const COL_PRICE: &str = "Prix";
pub const COL_STOCK: &str = "Stock";

pub const COL_STORE_ID: &str = "ID Magasin";
pub const COL_CITY: &str = "Ville";
pub const COL_EMPLOYEE_COUNT: &str = "Nombre de salariés";

pub const COL_SALE_DATE: &str = "Date";
pub const COL_QUANTITY: &str = "Quantité";

/// Parse one product row.
pub fn parse_product(cols: &Columns, record: &StringRecord) -> Result<Product, RowError> {
    let id = cols.get(record, COL_PRODUCT_ID)?.to_string();
    let name = cols.get(record, COL_PRODUCT_NAME)?.to_string();
    let price = parse_decimal(COL_PRICE, cols.get(record, COL_PRICE)?)?;
    let stock = parse_integer(COL_STOCK, cols.get(record, COL_STOCK)?)?;

    Ok(Product {
        id,
        name,
        price,
        stock: Some(stock),
    })
}

/// Parse one store row.
pub fn parse_store(cols: &Columns, record: &StringRecord) -> Result<Store, RowError> {
    let id = parse_integer(COL_STORE_ID, cols.get(record, COL_STORE_ID)?)?;
    let city = cols.get(record, COL_CITY)?.to_string();
    let employee_count = parse_integer(COL_EMPLOYEE_COUNT, cols.get(record, COL_EMPLOYEE_COUNT)?)?;

    Ok(Store {
        id,
        city,
        employee_count,
    })
}

/// Parse one sale row.
///
/// The store column is optional: an absent column or an empty value
/// yields a NULL store reference rather than a skipped row.
pub fn parse_sale(cols: &Columns, record: &StringRecord) -> Result<Sale, RowError> {
    let sale_date = cols.get(record, COL_SALE_DATE)?.to_string();
    let product_id = cols.get(record, COL_PRODUCT_ID)?.to_string();
    let quantity = parse_integer(COL_QUANTITY, cols.get(record, COL_QUANTITY)?)?;

    let store_id = match cols.get_optional(record, COL_STORE_ID) {
        Some(raw) if !raw.trim().is_empty() => Some(parse_integer(COL_STORE_ID, raw)?),
        _ => None,
    };

    Ok(Sale {
        sale_date,
        product_id,
        quantity,
        store_id,
    })
}
