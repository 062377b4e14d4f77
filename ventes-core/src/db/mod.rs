//! Database layer for ventes
//!
//! This module provides the storage layer using SQLite with:
//! - Schema migrations
//! - Repository pattern for inserts and queries

pub mod repo;
pub mod schema;

pub use repo::Database;
