//! Database Models

// Serde helpers
pub mod serde_helpers;

// Catalog
pub mod category;
pub mod dining_table;
pub mod food_item;
pub mod room;

// Ordering
pub mod coupon;
pub mod customer;
pub mod order;

// Re-exports
pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use coupon::{Coupon, CouponCreate, CouponUpdate, CouponUsage, DiscountType};
pub use customer::{CartItem, CartUpdate, Customer, CustomerCreate, CustomerUpdate};
pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate, OccupancyStatus};
pub use food_item::{FoodItem, FoodItemCreate, FoodItemUpdate};
pub use room::{Room, RoomCreate, RoomUpdate};
pub use order::{
    CouponSnapshot, Order, OrderEstimatedTimeUpdate, OrderItem, OrderPayment, OrderPaymentUpdate,
    OrderStatus, OrderStatusUpdate, OrderType, PaymentStatus, DEFAULT_ESTIMATED_TIME_MIN,
};
