//! Coupon API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::checkout::{check_coupon, settle};
use crate::core::ServerState;
use crate::db::models::{Coupon, CouponCreate, CouponUpdate, DiscountType};
use crate::db::repository::CouponRepository;
use crate::utils::validation::MAX_SHORT_TEXT_LEN;
use crate::utils::{ApiResponse, AppError, AppResult, created, ok, ok_list, ok_with_message};

const RESOURCE: &str = "coupon";

fn validate_bounds(
    discount_type: DiscountType,
    value: f64,
    min_order_amount: Option<f64>,
    usage_limit: Option<i64>,
    errors: &mut Vec<String>,
) {
    if !value.is_finite() || value <= 0.0 {
        errors.push("value must be a positive number".into());
    } else if discount_type == DiscountType::Percentage && value > 100.0 {
        errors.push("percentage value must not exceed 100".into());
    }
    if let Some(min) = min_order_amount
        && (!min.is_finite() || min < 0.0)
    {
        errors.push("minOrderAmount must be a non-negative number".into());
    }
    if let Some(limit) = usage_limit
        && limit <= 0
    {
        errors.push("usageLimit must be a positive integer".into());
    }
}

/// GET /api/coupons - 获取所有优惠券
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Coupon>>>> {
    let repo = CouponRepository::new(state.db.clone());
    let coupons = repo.find_all().await?;
    Ok(ok_list(coupons))
}

/// GET /api/coupons/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Coupon>>> {
    let repo = CouponRepository::new(state.db.clone());
    let coupon = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Coupon {} not found", id)))?;
    Ok(ok(coupon))
}

/// POST /api/coupons - 创建优惠券
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CouponCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Coupon>>)> {
    let mut errors = Vec::new();
    if payload.code.trim().is_empty() {
        errors.push("code must not be empty".into());
    } else if payload.code.len() > MAX_SHORT_TEXT_LEN {
        errors.push(format!("code is too long (max {MAX_SHORT_TEXT_LEN})"));
    }
    validate_bounds(
        payload.discount_type,
        payload.value,
        payload.min_order_amount,
        payload.usage_limit,
        &mut errors,
    );
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let repo = CouponRepository::new(state.db.clone());
    let coupon = repo.create(payload).await?;

    let id = coupon.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&coupon));

    Ok(created(coupon, "Coupon created successfully"))
}

/// PUT /api/coupons/{id} - 更新优惠券
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CouponUpdate>,
) -> AppResult<Json<ApiResponse<Coupon>>> {
    let repo = CouponRepository::new(state.db.clone());

    // Bounds checks need the effective type/value pair
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Coupon {} not found", id)))?;
    let mut errors = Vec::new();
    validate_bounds(
        payload.discount_type.unwrap_or(existing.discount_type),
        payload.value.unwrap_or(existing.value),
        payload.min_order_amount.or(existing.min_order_amount),
        payload.usage_limit.or(existing.usage_limit),
        &mut errors,
    );
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let coupon = repo.update(&id, payload).await?;
    state.broadcast_sync(RESOURCE, "updated", &id, Some(&coupon));
    Ok(ok(coupon))
}

/// DELETE /api/coupons/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let repo = CouponRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    if result {
        state.broadcast_sync::<()>(RESOURCE, "deleted", &id, None);
    }

    Ok(ok_with_message(result, "Coupon deleted"))
}

/// Validate-preview request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub code: String,
    pub order_amount: f64,
}

/// Validate-preview response: the coupon plus its monetary effect
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatePreview {
    pub coupon: Coupon,
    pub discount_amount: f64,
    pub total: f64,
}

/// POST /api/coupons/validate - 校验优惠券并预览折扣
pub async fn validate(
    State(state): State<ServerState>,
    Json(payload): Json<ValidateRequest>,
) -> AppResult<Json<ApiResponse<ValidatePreview>>> {
    if !payload.order_amount.is_finite() || payload.order_amount < 0.0 {
        return Err(AppError::validation("orderAmount must be a non-negative number"));
    }

    let repo = CouponRepository::new(state.db.clone());
    let coupon = check_coupon(&repo, None, Some(&payload.code), Some(payload.order_amount)).await?;

    let settlement = settle(
        payload.order_amount,
        0.0,
        0.0,
        Some((coupon.discount_type, coupon.value)),
    );
    Ok(ok(ValidatePreview {
        coupon,
        discount_amount: settlement.discount,
        total: settlement.total,
    }))
}
