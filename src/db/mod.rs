//! Database Module
//!
//! Embedded SurrealDB storage. Tables are schemaless documents; the few
//! constraints the domain relies on (unique coupon codes, lookup indexes)
//! are defined here at startup.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "savor";
const DATABASE: &str = "main";

/// Database service: owns the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk store under the given directory
    pub async fn new(db_dir: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_dir)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        let service = Self { db };
        service.setup().await?;
        tracing::info!("Database opened at {}", db_dir.display());
        Ok(service)
    }

    /// In-memory store, used by the test suite
    pub async fn memory() -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        let service = Self { db };
        service.setup().await?;
        Ok(service)
    }

    async fn setup(&self) -> Result<(), AppError> {
        self.db
            .use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        // Coupon codes are unique; phone is the customer lookup key.
        self.db
            .query(
                r#"
                DEFINE INDEX IF NOT EXISTS couponCodeUnique ON TABLE coupon COLUMNS code UNIQUE;
                DEFINE INDEX IF NOT EXISTS customerPhone ON TABLE customer COLUMNS phone;
                DEFINE INDEX IF NOT EXISTS orderCreatedAt ON TABLE `order` COLUMNS createdAt;
                "#,
            )
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
        Ok(())
    }
}
