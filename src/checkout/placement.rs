//! Order placement pipeline
//!
//! validate → upsert customer → check coupon → settle discount →
//! transactional persist (order + customer history + coupon consumption).

use chrono::Utc;
use tracing::{info, warn};

use super::coupon::check_coupon;
use super::discount::settle;
use super::validate::{CreateOrderRequest, ValidatedOrder, validate};
use crate::core::ServerState;
use crate::db::models::{
    Coupon, CouponSnapshot, Customer, CustomerCreate, CustomerUpdate, Order, OrderStatus,
    DEFAULT_ESTIMATED_TIME_MIN,
};
use crate::db::repository::{CouponRepository, CustomerRepository, OrderRepository};
use crate::utils::{AppError, AppResult};

/// Place an order end to end. Returns the persisted order document.
pub async fn place_order(state: &ServerState, req: CreateOrderRequest) -> AppResult<Order> {
    let valid = validate(&req).map_err(AppError::Validation)?;

    let customer = upsert_customer(state, &valid).await?;
    let customer_key = customer
        .id
        .as_ref()
        .map(|id| id.key().to_string())
        .ok_or_else(|| AppError::internal("Customer record has no id"))?;

    // Coupon settlement: the discount is recomputed from the coupon's own
    // value, never from the client-submitted amount
    let coupon = resolve_coupon(state, &valid).await?;
    let settlement = settle(
        valid.subtotal,
        valid.gst,
        valid.client_discount,
        coupon
            .as_ref()
            .map(|c| (c.discount_type, c.value)),
    );

    let applied_coupon = match &coupon {
        Some(c) => Some(CouponSnapshot {
            code: c.code.clone(),
            coupon: c
                .id
                .clone()
                .ok_or_else(|| AppError::internal("Coupon record has no id"))?,
            discount_type: c.discount_type,
            discount_value: c.value,
        }),
        None => None,
    };
    let coupon_key = applied_coupon
        .as_ref()
        .map(|snap| snap.coupon.key().to_string());

    let now = Utc::now();
    let order = Order {
        id: None,
        customer: customer.id.clone(),
        customer_name: valid.customer_name.clone(),
        customer_phone: valid.customer_phone.clone(),
        customer_email: valid.customer_email.clone(),
        order_type: valid.order_type,
        room_number: valid.room_number.clone(),
        table_number: valid.table_number.clone(),
        delivery_address: valid.delivery_address.clone(),
        items: valid.items.clone(),
        subtotal: valid.subtotal,
        gst: valid.gst,
        discount_amount: settlement.discount,
        total: settlement.total,
        status: OrderStatus::Confirmed,
        applied_coupon,
        estimated_time: Some(DEFAULT_ESTIMATED_TIME_MIN),
        payment: None,
        created_at: now,
        updated_at: now,
    };

    let repo = OrderRepository::new(state.db.clone());
    let created = repo
        .create_with_bookkeeping(order, &customer_key, coupon_key.as_deref())
        .await?;

    info!(
        order = %created.id.as_ref().map(|i| i.to_string()).unwrap_or_default(),
        customer = %customer_key,
        total = created.total,
        "order placed"
    );
    Ok(created)
}

/// Resolve the customer for a checkout: explicit id first (falling back on a
/// miss), then phone, creating the record when neither matches. Name/email
/// drift in the submitted payload is written back to the stored record.
async fn upsert_customer(state: &ServerState, valid: &ValidatedOrder) -> AppResult<Customer> {
    let repo = CustomerRepository::new(state.db.clone());

    let mut found = None;
    if let Some(user_id) = &valid.user_id {
        found = repo.find_by_id(user_id).await?;
        if found.is_none() {
            warn!(user_id = %user_id, "customer id not found, falling back to phone lookup");
        }
    }
    if found.is_none() {
        found = repo.find_by_phone(&valid.customer_phone).await?;
    }

    let Some(existing) = found else {
        return Ok(repo
            .create(CustomerCreate {
                name: valid.customer_name.clone(),
                phone: valid.customer_phone.clone(),
                email: valid.customer_email.clone(),
            })
            .await?);
    };

    let name_changed = existing.name != valid.customer_name;
    let email_changed = match &valid.customer_email {
        Some(email) => existing.email.as_deref() != Some(email.as_str()),
        None => false,
    };
    if name_changed || email_changed {
        let key = existing
            .id
            .as_ref()
            .map(|id| id.key().to_string())
            .ok_or_else(|| AppError::internal("Customer record has no id"))?;
        return Ok(repo
            .update(
                &key,
                CustomerUpdate {
                    name: name_changed.then(|| valid.customer_name.clone()),
                    email: if email_changed {
                        valid.customer_email.clone()
                    } else {
                        None
                    },
                    assigned_room: None,
                    assigned_table: None,
                },
            )
            .await?);
    }

    Ok(existing)
}

async fn resolve_coupon(
    state: &ServerState,
    valid: &ValidatedOrder,
) -> AppResult<Option<Coupon>> {
    if valid.coupon_id.is_none() && valid.coupon_code.is_none() {
        return Ok(None);
    }
    let repo = CouponRepository::new(state.db.clone());
    let coupon = check_coupon(
        &repo,
        valid.coupon_id.as_deref(),
        valid.coupon_code.as_deref(),
        Some(valid.subtotal + valid.gst),
    )
    .await?;
    Ok(Some(coupon))
}
