//! Coupon Repository

use super::{BaseRepository, Patch, RepoError, RepoResult, record_key};
use crate::db::models::{Coupon, CouponCreate, CouponUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "coupon";

#[derive(Clone)]
pub struct CouponRepository {
    base: BaseRepository,
}

impl CouponRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Coupon>> {
        let coupons: Vec<Coupon> = self
            .base
            .db()
            .query("SELECT * FROM coupon ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(coupons)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Coupon>> {
        let coupon: Option<Coupon> =
            self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(coupon)
    }

    /// Find coupon by code (codes are stored uppercase)
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Coupon>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM coupon WHERE code = $code LIMIT 1")
            .bind(("code", code.trim().to_uppercase()))
            .await?;
        let coupons: Vec<Coupon> = result.take(0)?;
        Ok(coupons.into_iter().next())
    }

    /// Create a new coupon (code normalized to uppercase, must be unique)
    pub async fn create(&self, data: CouponCreate) -> RepoResult<Coupon> {
        let code = data.code.trim().to_uppercase();
        if self.find_by_code(&code).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Coupon '{}' already exists",
                code
            )));
        }

        let now = Utc::now();
        let coupon = Coupon {
            id: None,
            code,
            discount_type: data.discount_type,
            value: data.value,
            expiry_date: data.expiry_date,
            min_order_amount: data.min_order_amount,
            is_active: data.is_active,
            usage_limit: data.usage_limit,
            used_count: 0,
            usage_history: vec![],
            created_at: now,
            updated_at: now,
        };

        let created: Option<Coupon> = self.base.db().create(TABLE).content(coupon).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create coupon".into()))
    }

    /// Update a coupon (partial merge)
    pub async fn update(&self, id: &str, mut data: CouponUpdate) -> RepoResult<Coupon> {
        if let Some(code) = data.code.take() {
            let code = code.trim().to_uppercase();
            if let Some(existing) = self.find_by_code(&code).await?
                && existing.id.as_ref().map(|i| i.key().to_string()).as_deref()
                    != Some(record_key(TABLE, id))
            {
                return Err(RepoError::Duplicate(format!(
                    "Coupon '{}' already exists",
                    code
                )));
            }
            data.code = Some(code);
        }

        let updated: Option<Coupon> = self
            .base
            .db()
            .update((TABLE, record_key(TABLE, id)))
            .merge(Patch::new(data))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Coupon {} not found", id)))
    }

    /// Lazy deactivation: flip isActive off when an expired/exhausted coupon
    /// is discovered during a read
    pub async fn deactivate(&self, id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE type::thing('coupon', $key) SET isActive = false, updatedAt = $now")
            .bind(("key", record_key(TABLE, id).to_string()))
            .bind(("now", Utc::now()))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<Coupon> = self
            .base
            .db()
            .delete((TABLE, record_key(TABLE, id)))
            .await?;
        Ok(deleted.is_some())
    }
}
