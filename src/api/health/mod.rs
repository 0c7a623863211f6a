//! Health API 模块

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult, ok};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
    pub environment: String,
}

/// GET /api/health - 健康检查（含数据库连通性）
async fn health(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<HealthStatus>>> {
    state
        .db
        .query("RETURN 1")
        .await
        .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;

    Ok(ok(HealthStatus {
        status: "ok",
        database: "connected",
        environment: state.config.environment.clone(),
    }))
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}
