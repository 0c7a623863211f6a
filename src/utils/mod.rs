//! 工具模块 - 通用工具函数和类型
//!
//! - [`AppError`] / [`ApiResponse`] - 应用错误类型和响应结构
//! - [`logger`] - 日志初始化
//! - [`validation`] - 输入校验

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{ApiResponse, AppError};
pub use error::{created, ok, ok_list, ok_with_message};

/// Application-level Result type used in HTTP handlers and application logic
pub type AppResult<T> = Result<T, AppError>;
