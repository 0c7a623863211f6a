//! Checkout - 下单与优惠券结算
//!
//! - [`validate`] - 请求校验（逐条累积错误）
//! - [`discount`] - 折扣/总价计算
//! - [`coupon`] - 优惠券有效性检查
//! - [`placement`] - 下单流水线（事务持久化）

pub mod coupon;
pub mod discount;
pub mod placement;
pub mod validate;

pub use coupon::check_coupon;
pub use discount::{Settlement, settle};
pub use placement::place_order;
pub use validate::{CreateOrderRequest, ValidatedOrder, validate};
