//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举
//! - [`ApiResponse`] - API 响应结构
//!
//! # 响应格式
//!
//! ```json
//! { "success": true, "message": "Success", "data": { ... } }
//! { "success": false, "message": "Validation failed", "errors": ["..."] }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// API 统一响应结构
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// 消息
    pub message: String,
    /// 列表响应的记录数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// 响应数据
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// 逐条列出的校验错误
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// 应用错误枚举
///
/// | 分类 | HTTP | 说明 |
/// |------|------|------|
/// | Validation | 400 | 字段校验失败，逐条列出 |
/// | BusinessRule | 400 | 业务规则拒绝（优惠券、状态流转） |
/// | Invalid | 400 | 无效请求 |
/// | NotFound | 404 | 资源不存在 |
/// | Conflict | 409 | 资源冲突（重复编码/名称） |
/// | Database | 500 | 数据库错误 |
/// | Internal | 500 | 内部错误 |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("{0}")]
    BusinessRule(String),

    #[error("Invalid request: {0}")]
    Invalid(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(vec![msg.into()])
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        Self::BusinessRule(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Validation(errs) => {
                (StatusCode::BAD_REQUEST, "Validation failed".to_string(), Some(errs))
            }
            AppError::BusinessRule(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ApiResponse::<()> {
            success: false,
            message,
            count: None,
            data: None,
            errors,
        });

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Rule(msg) => AppError::BusinessRule(msg),
            RepoError::Validation(msg) => AppError::Validation(vec![msg]),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: "Success".to_string(),
        count: None,
        data: Some(data),
        errors: None,
    })
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: message.into(),
        count: None,
        data: Some(data),
        errors: None,
    })
}

/// Create a successful list response carrying the record count
pub fn ok_list<T: Serialize>(data: Vec<T>) -> Json<ApiResponse<Vec<T>>> {
    Json(ApiResponse {
        success: true,
        message: "Success".to_string(),
        count: Some(data.len()),
        data: Some(data),
        errors: None,
    })
}

/// Create a 201 Created response with custom message
pub fn created<T: Serialize>(
    data: T,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::CREATED,
        Json(ApiResponse {
            success: true,
            message: message.into(),
            count: None,
            data: Some(data),
            errors: None,
        }),
    )
}
