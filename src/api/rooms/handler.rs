//! Room API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{Room, RoomCreate, RoomUpdate};
use crate::db::repository::RoomRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, created, ok, ok_list, ok_with_message};

const RESOURCE: &str = "room";

/// GET /api/rooms - 获取所有房间
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Room>>>> {
    let repo = RoomRepository::new(state.db.clone());
    let rooms = repo.find_all().await?;
    Ok(ok_list(rooms))
}

/// GET /api/rooms/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Room>>> {
    let repo = RoomRepository::new(state.db.clone());
    let room = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room {} not found", id)))?;
    Ok(ok(room))
}

/// POST /api/rooms - 创建房间
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoomCreate>,
) -> AppResult<(StatusCode, Json<ApiResponse<Room>>)> {
    validate_required_text(&payload.number, "number", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.room_type, "roomType", MAX_NAME_LEN)?;

    let repo = RoomRepository::new(state.db.clone());
    let room = repo.create(payload).await?;

    let id = room.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    state.broadcast_sync(RESOURCE, "created", &id, Some(&room));

    Ok(created(room, "Room created successfully"))
}

/// PUT /api/rooms/{id} - 更新房间
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RoomUpdate>,
) -> AppResult<Json<ApiResponse<Room>>> {
    validate_optional_text(&payload.number, "number", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.room_type, "roomType", MAX_NAME_LEN)?;

    let repo = RoomRepository::new(state.db.clone());
    let room = repo.update(&id, payload).await?;
    state.broadcast_sync(RESOURCE, "updated", &id, Some(&room));
    Ok(ok(room))
}

/// DELETE /api/rooms/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let repo = RoomRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    if result {
        state.broadcast_sync::<()>(RESOURCE, "deleted", &id, None);
    }

    Ok(ok_with_message(result, "Room deleted"))
}
