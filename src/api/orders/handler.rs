//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::checkout::{CreateOrderRequest, place_order};
use crate::core::ServerState;
use crate::db::models::{
    Order, OrderEstimatedTimeUpdate, OrderPayment, OrderPaymentUpdate, OrderStatus,
    OrderStatusUpdate,
};
use crate::db::repository::OrderRepository;
use crate::utils::{ApiResponse, AppError, AppResult, created, ok, ok_list, ok_with_message};

const RESOURCE: &str = "order";

/// POST /api/orders - 下单（含优惠券结算）
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Order>>)> {
    let order = place_order(&state, payload).await?;

    let id = order.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&order));

    Ok(created(order, "Order created successfully"))
}

/// Query params for listing orders
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListQuery {
    pub user_id: Option<String>,
    pub phone: Option<String>,
    /// Comma-splittable status filter ("confirmed,preparing")
    pub status: Option<String>,
}

/// GET /api/orders - 订单列表（userId/phone/status 过滤，新订单在前）
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let mut statuses: Vec<OrderStatus> = Vec::new();
    if let Some(raw) = &query.status {
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let status = OrderStatus::parse(part)
                .ok_or_else(|| AppError::invalid(format!("Unknown status '{part}'")))?;
            if !statuses.contains(&status) {
                statuses.push(status);
            }
        }
    }

    let repo = OrderRepository::new(state.db.clone());
    let orders = repo
        .find_filtered(query.user_id, query.phone, statuses)
        .await?;
    Ok(ok_list(orders))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(ok(order))
}

/// PATCH /api/orders/{id}/status - 状态流转（按转移表校验）
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    if !order.status.can_transition_to(payload.status) {
        return Err(AppError::business_rule(format!(
            "Illegal status transition from '{}' to '{}'",
            order.status, payload.status
        )));
    }

    let updated = repo.set_status(&id, payload.status).await?;
    state.broadcast_sync(RESOURCE, "updated", &id, Some(&updated));
    Ok(ok(updated))
}

/// PATCH /api/orders/{id}/payment - 附加/更新内嵌支付记录
pub async fn update_payment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderPaymentUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    if !payload.amount.is_finite() || payload.amount < 0.0 {
        return Err(AppError::validation("amount must be a non-negative number"));
    }
    if payload.method.trim().is_empty() {
        return Err(AppError::validation("method must not be empty"));
    }

    let repo = OrderRepository::new(state.db.clone());
    let payment = OrderPayment {
        method: payload.method,
        status: payload.status,
        amount: payload.amount,
        transaction_ref: payload.transaction_ref,
    };
    let updated = repo.set_payment(&id, payment).await?;
    state.broadcast_sync(RESOURCE, "updated", &id, Some(&updated));
    Ok(ok(updated))
}

/// PATCH /api/orders/{id}/estimated-time
pub async fn update_estimated_time(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderEstimatedTimeUpdate>,
) -> AppResult<Json<ApiResponse<Order>>> {
    if payload.estimated_time < 0 {
        return Err(AppError::validation("estimatedTime must not be negative"));
    }

    let repo = OrderRepository::new(state.db.clone());
    let updated = repo.set_estimated_time(&id, payload.estimated_time).await?;
    state.broadcast_sync(RESOURCE, "updated", &id, Some(&updated));
    Ok(ok(updated))
}

/// DELETE /api/orders/{id} - 管理员显式删除
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let repo = OrderRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    if result {
        state.broadcast_sync::<()>(RESOURCE, "deleted", &id, None);
    }

    Ok(ok_with_message(result, "Order deleted"))
}
