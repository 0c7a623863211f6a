//! Customer Model
//!
//! 客户：手机号为查找主键，内嵌购物车快照和订单历史

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// One entry in a customer's embedded cart snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Referenced food item id
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Customer entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    /// Primary natural key for lookup
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Order references, appended on every placed order
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub ordered_items: Vec<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_table: Option<String>,
    /// Embedded cart snapshot, patched via its own endpoint
    #[serde(default)]
    pub cart: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreate {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Update customer payload (partial)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_table: Option<String>,
}

/// Cart patch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartUpdate {
    pub items: Vec<CartItem>,
}
