//! Coupon Model
//!
//! 优惠券：编码唯一（大写），带过期时间、使用上限和使用历史

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use surrealdb::RecordId;

/// Discount type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountType::Percentage => f.write_str("percentage"),
            DiscountType::Fixed => f.write_str("fixed"),
        }
    }
}

/// One redemption in a coupon's usage history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponUsage {
    #[serde(with = "serde_helpers::record_id")]
    pub customer: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub order: RecordId,
    pub used_at: DateTime<Utc>,
}

/// Coupon entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Uppercase, unique
    pub code: String,
    pub discount_type: DiscountType,
    pub value: f64,
    pub expiry_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order_amount: Option<f64>,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<i64>,
    #[serde(default)]
    pub used_count: i64,
    #[serde(default)]
    pub usage_history: Vec<CouponUsage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Coupon {
    /// Whether the usage limit (when set) has been reached
    pub fn is_exhausted(&self) -> bool {
        matches!(self.usage_limit, Some(limit) if limit > 0 && self.used_count >= limit)
    }

    /// Whether the expiry timestamp is at or before `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date <= now
    }
}

/// Create coupon payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponCreate {
    pub code: String,
    pub discount_type: DiscountType,
    pub value: f64,
    pub expiry_date: DateTime<Utc>,
    #[serde(default)]
    pub min_order_amount: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub usage_limit: Option<i64>,
}

/// Update coupon payload (partial)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn coupon(limit: Option<i64>, used: i64, expiry_in: Duration) -> Coupon {
        let now = Utc::now();
        Coupon {
            id: None,
            code: "SAVE10".into(),
            discount_type: DiscountType::Percentage,
            value: 10.0,
            expiry_date: now + expiry_in,
            min_order_amount: None,
            is_active: true,
            usage_limit: limit,
            used_count: used,
            usage_history: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn no_limit_means_unlimited() {
        assert!(!coupon(None, 10_000, Duration::days(1)).is_exhausted());
    }

    #[test]
    fn exhausted_at_limit() {
        assert!(coupon(Some(1), 1, Duration::days(1)).is_exhausted());
        assert!(!coupon(Some(2), 1, Duration::days(1)).is_exhausted());
    }

    #[test]
    fn expiry_is_inclusive() {
        let c = coupon(None, 0, Duration::zero());
        assert!(c.is_expired(c.expiry_date));
        assert!(!coupon(None, 0, Duration::days(1)).is_expired(Utc::now()));
    }
}
