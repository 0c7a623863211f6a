//! API 路由模块
//!
//! 每个资源一个子模块，`router()` 返回挂载在 `/api/<resource>` 下的子路由，
//! 由 [`crate::core::server::build_app`] 统一合并。

pub mod categories;
pub mod coupons;
pub mod customers;
pub mod foods;
pub mod health;
pub mod orders;
pub mod rooms;
pub mod sync;
pub mod tables;
