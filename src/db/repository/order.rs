//! Order Repository
//!
//! Listing/filtering plus the transactional placement write. Placing an
//! order touches three documents (order, customer history, coupon usage);
//! the write runs in a single transaction and the coupon increment is a
//! conditional update, so an exhausted limit aborts the whole placement
//! at commit time.

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Order, OrderPayment, OrderStatus};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "order";

/// Message thrown inside the placement transaction when the conditional
/// coupon update finds the limit already reached
const LIMIT_THROW: &str = "Coupon usage limit reached";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// List orders newest-first, filtered by customer reference, phone
    /// and/or a set of statuses
    pub async fn find_filtered(
        &self,
        customer: Option<String>,
        phone: Option<String>,
        statuses: Vec<OrderStatus>,
    ) -> RepoResult<Vec<Order>> {
        // `order` is a SurrealQL keyword, so the table name is escaped in
        // raw statements
        let mut sql = String::from("SELECT * FROM `order`");
        let mut conds: Vec<&str> = Vec::new();
        if customer.is_some() {
            conds.push("customer = $customer");
        }
        if phone.is_some() {
            conds.push("customerPhone = $phone");
        }
        if !statuses.is_empty() {
            conds.push("status IN $statuses");
        }
        if !conds.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conds.join(" AND "));
        }
        sql.push_str(" ORDER BY createdAt DESC");

        let mut query = self.base.db().query(sql);
        if let Some(customer) = customer {
            let full = if customer.contains(':') {
                customer
            } else {
                format!("customer:{customer}")
            };
            query = query.bind(("customer", full));
        }
        if let Some(phone) = phone {
            query = query.bind(("phone", phone));
        }
        if !statuses.is_empty() {
            query = query.bind(("statuses", statuses));
        }

        let orders: Vec<Order> = query.await?.take(0)?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select((TABLE, record_key(TABLE, id))).await?;
        Ok(order)
    }

    /// Persist a new order together with its bookkeeping in one transaction:
    /// append the order to the customer's history and, when a coupon is
    /// involved, consume one use (guarded by `usedCount < usageLimit`) and
    /// auto-deactivate the coupon at its limit.
    pub async fn create_with_bookkeeping(
        &self,
        order: Order,
        customer_key: &str,
        coupon_key: Option<&str>,
    ) -> RepoResult<Order> {
        let sql = if coupon_key.is_some() {
            r#"
            BEGIN TRANSACTION;
            LET $ord = (CREATE `order` CONTENT $content)[0];
            UPDATE type::thing('customer', $customerKey)
                SET orderedItems += <string>$ord.id, updatedAt = $now;
            LET $consumed = UPDATE type::thing('coupon', $couponKey)
                SET usedCount += 1,
                    usageHistory += {
                        customer: <string>type::thing('customer', $customerKey),
                        order: <string>$ord.id,
                        usedAt: $now
                    },
                    updatedAt = $now
                WHERE usageLimit = NONE OR usedCount < usageLimit
                RETURN AFTER;
            IF array::len($consumed) = 0 { THROW "Coupon usage limit reached" };
            UPDATE type::thing('coupon', $couponKey)
                SET isActive = false, updatedAt = $now
                WHERE usageLimit != NONE AND usedCount >= usageLimit;
            COMMIT TRANSACTION;
            RETURN $ord;
            "#
        } else {
            r#"
            BEGIN TRANSACTION;
            LET $ord = (CREATE `order` CONTENT $content)[0];
            UPDATE type::thing('customer', $customerKey)
                SET orderedItems += <string>$ord.id, updatedAt = $now;
            COMMIT TRANSACTION;
            RETURN $ord;
            "#
        };

        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("content", order))
            .bind(("customerKey", customer_key.to_string()))
            .bind(("now", Utc::now()));
        if let Some(coupon_key) = coupon_key {
            query = query.bind(("couponKey", coupon_key.to_string()));
        }

        let mut res = query.await?;
        let errors = res.take_errors();
        if !errors.is_empty() {
            let msgs: Vec<String> = errors.into_values().map(|e| e.to_string()).collect();
            if msgs.iter().any(|m| m.contains(LIMIT_THROW)) {
                return Err(RepoError::Rule(LIMIT_THROW.into()));
            }
            return Err(RepoError::Database(msgs.join("; ")));
        }

        let last = res.num_statements().saturating_sub(1);
        let created: Option<Order> = res.take(last)?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".into()))
    }

    /// Field-level status update; transition legality is checked by the caller
    pub async fn set_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE type::thing('order', $key) SET status = $status, updatedAt = $now RETURN AFTER",
            )
            .bind(("key", record_key(TABLE, id).to_string()))
            .bind(("status", status))
            .bind(("now", Utc::now()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Attach or replace the embedded payment sub-record
    pub async fn set_payment(&self, id: &str, payment: OrderPayment) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE type::thing('order', $key) SET payment = $payment, updatedAt = $now RETURN AFTER",
            )
            .bind(("key", record_key(TABLE, id).to_string()))
            .bind(("payment", payment))
            .bind(("now", Utc::now()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    pub async fn set_estimated_time(&self, id: &str, minutes: i64) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE type::thing('order', $key) SET estimatedTime = $minutes, updatedAt = $now RETURN AFTER",
            )
            .bind(("key", record_key(TABLE, id).to_string()))
            .bind(("minutes", minutes))
            .bind(("now", Utc::now()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Explicit admin hard-delete
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<Order> = self
            .base
            .db()
            .delete((TABLE, record_key(TABLE, id)))
            .await?;
        Ok(deleted.is_some())
    }
}
