//! Food Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{FoodItem, FoodItemCreate, FoodItemUpdate};
use crate::db::repository::{CategoryRepository, FoodItemRepository};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_amount, validate_optional_text,
    validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, created, ok, ok_list, ok_with_message};

const RESOURCE: &str = "food";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub category: Option<String>,
}

/// GET /api/foods - 菜品列表（?category= 按分类过滤）
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<FoodItem>>>> {
    let repo = FoodItemRepository::new(state.db.clone());
    let foods = repo.find_all(query.category).await?;
    Ok(ok_list(foods))
}

/// GET /api/foods/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<FoodItem>>> {
    let repo = FoodItemRepository::new(state.db.clone());
    let food = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Food item {} not found", id)))?;
    Ok(ok(food))
}

/// POST /api/foods - 创建菜品（分类必须已存在）
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FoodItemCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<FoodItem>>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "imageUrl", MAX_URL_LEN)?;
    validate_amount(payload.price, "price")?;

    let categories = CategoryRepository::new(state.db.clone());
    let category_id = payload.category.to_string();
    if categories.find_by_id(&category_id).await?.is_none() {
        return Err(AppError::invalid(format!(
            "Category {} does not exist",
            category_id
        )));
    }

    let repo = FoodItemRepository::new(state.db.clone());
    let food = repo.create(payload).await?;

    let id = food.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&food));

    Ok(created(food, "Food item created successfully"))
}

/// PUT /api/foods/{id} - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<FoodItemUpdate>,
) -> AppResult<Json<ApiResponse<FoodItem>>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.image_url, "imageUrl", MAX_URL_LEN)?;
    if let Some(price) = payload.price {
        validate_amount(price, "price")?;
    }
    if let Some(category) = &payload.category {
        let categories = CategoryRepository::new(state.db.clone());
        let category_id = category.to_string();
        if categories.find_by_id(&category_id).await?.is_none() {
            return Err(AppError::invalid(format!(
                "Category {} does not exist",
                category_id
            )));
        }
    }

    let repo = FoodItemRepository::new(state.db.clone());
    let food = repo.update(&id, payload).await?;
    state.broadcast_sync(RESOURCE, "updated", &id, Some(&food));
    Ok(ok(food))
}

/// DELETE /api/foods/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let repo = FoodItemRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    if result {
        state.broadcast_sync::<()>(RESOURCE, "deleted", &id, None);
    }

    Ok(ok_with_message(result, "Food item deleted"))
}
