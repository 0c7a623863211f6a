//! Coupon validity check
//!
//! Read-side gate for redemption and for the preview endpoint. An expired
//! or exhausted coupon is lazily flipped inactive as a side effect of the
//! read; the hard guarantee against over-redemption is the conditional
//! update inside the placement transaction.

use chrono::Utc;

use crate::db::models::Coupon;
use crate::db::repository::CouponRepository;
use crate::utils::{AppError, AppResult};

/// Fetch a coupon by id (preferred) or code and check that it may be
/// applied. `order_amount`, when known, is checked against the coupon's
/// minimum order amount.
pub async fn check_coupon(
    repo: &CouponRepository,
    coupon_id: Option<&str>,
    coupon_code: Option<&str>,
    order_amount: Option<f64>,
) -> AppResult<Coupon> {
    let coupon = match (coupon_id, coupon_code) {
        (Some(id), _) => repo.find_by_id(id).await?,
        (None, Some(code)) => repo.find_by_code(code).await?,
        (None, None) => None,
    };
    let Some(coupon) = coupon else {
        return Err(AppError::business_rule("Coupon not found"));
    };

    let key = coupon
        .id
        .as_ref()
        .map(|id| id.key().to_string())
        .ok_or_else(|| AppError::internal("Coupon record has no id"))?;

    // Exhaustion is reported before the bare isActive flag: a coupon
    // auto-deactivated at its limit still answers "usage limit reached",
    // not "no longer valid"
    if coupon.is_expired(Utc::now()) {
        repo.deactivate(&key).await?;
        return Err(AppError::business_rule("Coupon is no longer valid"));
    }

    if coupon.is_exhausted() {
        repo.deactivate(&key).await?;
        return Err(AppError::business_rule("Coupon usage limit reached"));
    }

    if !coupon.is_active {
        return Err(AppError::business_rule("Coupon is no longer valid"));
    }

    if let Some(min) = coupon.min_order_amount
        && let Some(amount) = order_amount
        && amount < min
    {
        return Err(AppError::business_rule(format!(
            "Order amount is below the coupon minimum of {min}"
        )));
    }

    Ok(coupon)
}
