//! Repository Module
//!
//! CRUD operations over the embedded document store.

pub mod category;
pub mod coupon;
pub mod customer;
pub mod dining_table;
pub mod food_item;
pub mod order;
pub mod room;

pub use category::CategoryRepository;
pub use coupon::CouponRepository;
pub use customer::CustomerRepository;
pub use dining_table::DiningTableRepository;
pub use food_item::FoodItemRepository;
pub use order::OrderRepository;
pub use room::RoomRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Business-rule rejection surfaced by the store (e.g. a conditional
    /// update that found its guard violated at commit time)
    #[error("{0}")]
    Rule(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Strip a "table:" prefix from an id if present ("coupon:xxx" -> "xxx")
pub fn record_key<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Wraps a partial-update DTO so every merge also refreshes `updatedAt`
#[derive(Debug, serde::Serialize)]
pub(crate) struct Patch<T: serde::Serialize> {
    #[serde(flatten)]
    pub data: T,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl<T: serde::Serialize> Patch<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            updated_at: chrono::Utc::now(),
        }
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_key_strips_prefix() {
        assert_eq!(record_key("coupon", "coupon:abc"), "abc");
        assert_eq!(record_key("coupon", "abc"), "abc");
        // Prefix of a different table is left alone
        assert_eq!(record_key("coupon", "order:abc"), "order:abc");
    }
}
