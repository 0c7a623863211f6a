//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{CartUpdate, Customer, CustomerCreate, CustomerUpdate};
use crate::db::repository::CustomerRepository;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, created, ok, ok_list};

const RESOURCE: &str = "customer";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub phone: Option<String>,
}

/// GET /api/customers - 客户列表（?phone= 按手机号查找）
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Customer>>>> {
    let repo = CustomerRepository::new(state.db.clone());
    let customers = match query.phone {
        Some(phone) => repo.find_by_phone(&phone).await?.into_iter().collect(),
        None => repo.find_all().await?,
    };
    Ok(ok_list(customers))
}

/// GET /api/customers/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {} not found", id)))?;
    Ok(ok(customer))
}

/// POST /api/customers - 手动建档（下单时通常自动建档）
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Customer>>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;

    let repo = CustomerRepository::new(state.db.clone());
    if repo.find_by_phone(&payload.phone).await?.is_some() {
        return Err(AppError::conflict(format!(
            "Customer with phone {} already exists",
            payload.phone
        )));
    }
    let customer = repo.create(payload).await?;

    let id = customer.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&customer));

    Ok(created(customer, "Customer created successfully"))
}

/// PUT /api/customers/{id} - 更新客户资料
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CustomerUpdate>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.assigned_room, "assignedRoom", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.assigned_table, "assignedTable", MAX_SHORT_TEXT_LEN)?;

    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo.update(&id, payload).await?;
    state.broadcast_sync(RESOURCE, "updated", &id, Some(&customer));
    Ok(ok(customer))
}

/// PATCH /api/customers/{id}/cart - 整体替换购物车快照
pub async fn update_cart(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CartUpdate>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    for (index, item) in payload.items.iter().enumerate() {
        if item.quantity < 1 {
            return Err(AppError::validation(format!(
                "Item {}: quantity must be an integer of at least 1",
                index + 1
            )));
        }
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(AppError::validation(format!(
                "Item {}: price must be a non-negative number",
                index + 1
            )));
        }
    }

    let repo = CustomerRepository::new(state.db.clone());
    let customer = repo.update_cart(&id, payload.items).await?;
    state.broadcast_sync(RESOURCE, "updated", &id, Some(&customer));
    Ok(ok(customer))
}
