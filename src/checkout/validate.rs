//! Order payload validation
//!
//! Every violation is collected into a single list so the caller sees the
//! full set of problems at once, not just the first.

use serde::Deserialize;

use crate::db::models::{DiscountType, OrderItem, OrderType};

/// Raw checkout payload. All fields are optional at the serde level so a
/// missing field surfaces as a listed violation instead of a deserialization
/// failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOrderRequest {
    pub user_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub order_type: Option<String>,
    pub room_number: Option<String>,
    pub table_number: Option<String>,
    pub delivery_address: Option<String>,
    pub items: Option<Vec<OrderItemPayload>>,
    pub subtotal: Option<f64>,
    pub gst: Option<f64>,
    pub discount_amount: Option<f64>,
    pub total: Option<f64>,
    pub coupon_code: Option<String>,
    pub coupon_id: Option<String>,
    pub coupon_discount_type: Option<String>,
    pub coupon_discount_value: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderItemPayload {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<f64>,
    pub image_url: Option<String>,
}

/// A payload that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedOrder {
    pub user_id: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub order_type: OrderType,
    pub room_number: Option<String>,
    pub table_number: Option<String>,
    pub delivery_address: Option<String>,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    pub gst: f64,
    pub client_discount: f64,
    pub coupon_code: Option<String>,
    pub coupon_id: Option<String>,
    pub coupon_discount_type: Option<DiscountType>,
    pub coupon_discount_value: Option<f64>,
}

fn required_text(value: &Option<String>, field: &str, errors: &mut Vec<String>) -> Option<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => {
            errors.push(format!("{field} is required"));
            None
        }
    }
}

fn required_amount(value: Option<f64>, field: &str, errors: &mut Vec<String>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => {
            errors.push(format!("{field} must be a non-negative number"));
            0.0
        }
    }
}

/// Validate the checkout payload, accumulating every violated rule.
pub fn validate(req: &CreateOrderRequest) -> Result<ValidatedOrder, Vec<String>> {
    let mut errors = Vec::new();

    let customer_name = required_text(&req.customer_name, "customerName", &mut errors);
    let customer_phone = required_text(&req.customer_phone, "customerPhone", &mut errors);
    let customer_email = req
        .customer_email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string);

    let order_type = match req.order_type.as_deref() {
        None => {
            errors.push("orderType is required".into());
            None
        }
        Some(raw) => match OrderType::parse(raw) {
            Some(t) => Some(t),
            None => {
                errors.push(format!(
                    "orderType must be one of: {}",
                    OrderType::ACCEPTED.join(", ")
                ));
                None
            }
        },
    };

    // Fulfillment target depends on the flow
    let mut room_number = None;
    let mut table_number = None;
    let mut delivery_address = None;
    match order_type {
        Some(OrderType::Rooms) => {
            room_number = required_text(&req.room_number, "roomNumber", &mut errors);
        }
        Some(OrderType::DineIn) => {
            table_number = required_text(&req.table_number, "tableNumber", &mut errors);
        }
        Some(OrderType::Delivery) => {
            delivery_address = required_text(&req.delivery_address, "deliveryAddress", &mut errors);
        }
        Some(OrderType::Takeaway) | None => {}
    }

    // Line items
    let mut items = Vec::new();
    match req.items.as_deref() {
        None | Some([]) => errors.push("items must contain at least one item".into()),
        Some(payload_items) => {
            for (idx, item) in payload_items.iter().enumerate() {
                let n = idx + 1;
                let id = match item.id.as_deref().map(str::trim) {
                    Some(v) if !v.is_empty() => v.to_string(),
                    _ => {
                        errors.push(format!("Item {n}: id is required"));
                        String::new()
                    }
                };
                let name = match item.name.as_deref().map(str::trim) {
                    Some(v) if !v.is_empty() => v.to_string(),
                    _ => {
                        errors.push(format!("Item {n}: name is required"));
                        String::new()
                    }
                };
                let price = match item.price {
                    Some(p) if p.is_finite() && p >= 0.0 => p,
                    _ => {
                        errors.push(format!("Item {n}: price must be a non-negative number"));
                        0.0
                    }
                };
                let quantity = match item.quantity {
                    Some(q) if q.is_finite() && q >= 1.0 && q.fract() == 0.0 => q as i64,
                    _ => {
                        errors.push(format!("Item {n}: quantity must be an integer of at least 1"));
                        0
                    }
                };
                items.push(OrderItem {
                    id,
                    name,
                    price,
                    quantity,
                    image_url: item.image_url.clone(),
                });
            }
        }
    }

    let subtotal = required_amount(req.subtotal, "subtotal", &mut errors);
    let gst = required_amount(req.gst, "gst", &mut errors);
    let _total = required_amount(req.total, "total", &mut errors);

    let client_discount = match req.discount_amount {
        None => 0.0,
        Some(d) if d.is_finite() && d >= 0.0 => d,
        Some(_) => {
            errors.push("discountAmount must be a non-negative number".into());
            0.0
        }
    };

    let coupon_discount_type = match req.coupon_discount_type.as_deref() {
        None => None,
        Some("percentage") => Some(DiscountType::Percentage),
        Some("fixed") => Some(DiscountType::Fixed),
        Some(_) => {
            errors.push("couponDiscountType must be 'percentage' or 'fixed'".into());
            None
        }
    };
    if let Some(v) = req.coupon_discount_value
        && (!v.is_finite() || v <= 0.0)
    {
        errors.push("couponDiscountValue must be a positive number".into());
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ValidatedOrder {
        user_id: req.user_id.clone(),
        // Unwraps are guarded by the empty error list above
        customer_name: customer_name.unwrap_or_default(),
        customer_phone: customer_phone.unwrap_or_default(),
        customer_email,
        order_type: order_type.unwrap_or(OrderType::Rooms),
        room_number,
        table_number,
        delivery_address,
        items,
        subtotal,
        gst,
        client_discount,
        coupon_code: req
            .coupon_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_uppercase),
        coupon_id: req.coupon_id.clone(),
        coupon_discount_type,
        coupon_discount_value: req.coupon_discount_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateOrderRequest {
        CreateOrderRequest {
            customer_name: Some("A".into()),
            customer_phone: Some("999".into()),
            order_type: Some("Rooms".into()),
            room_number: Some("12".into()),
            items: Some(vec![OrderItemPayload {
                id: Some("f1".into()),
                name: Some("Paneer".into()),
                price: Some(200.0),
                quantity: Some(2.0),
                image_url: None,
            }]),
            subtotal: Some(400.0),
            gst: Some(20.0),
            discount_amount: Some(0.0),
            total: Some(420.0),
            ..Default::default()
        }
    }

    #[test]
    fn valid_payload_passes() {
        let v = validate(&valid_request()).unwrap();
        assert_eq!(v.customer_name, "A");
        assert_eq!(v.order_type, OrderType::Rooms);
        assert_eq!(v.items.len(), 1);
        assert_eq!(v.items[0].quantity, 2);
    }

    #[test]
    fn empty_items_is_rejected() {
        let mut req = valid_request();
        req.items = Some(vec![]);
        let errs = validate(&req).unwrap_err();
        assert!(errs.iter().any(|e| e.contains("at least one item")));
    }

    #[test]
    fn zero_quantity_cites_the_item() {
        let mut req = valid_request();
        req.items.as_mut().unwrap()[0].quantity = Some(0.0);
        let errs = validate(&req).unwrap_err();
        assert!(errs.iter().any(|e| e.contains("Item 1") && e.contains("quantity")));
    }

    #[test]
    fn fractional_quantity_is_rejected() {
        let mut req = valid_request();
        req.items.as_mut().unwrap()[0].quantity = Some(1.5);
        assert!(validate(&req).is_err());
    }

    #[test]
    fn violations_accumulate() {
        let req = CreateOrderRequest::default();
        let errs = validate(&req).unwrap_err();
        // Name, phone, order type, items, subtotal, gst, total all missing
        assert!(errs.len() >= 7, "expected all violations listed, got {errs:?}");
        assert!(errs.iter().any(|e| e.contains("customerName")));
        assert!(errs.iter().any(|e| e.contains("customerPhone")));
        assert!(errs.iter().any(|e| e.contains("orderType")));
    }

    #[test]
    fn fulfillment_target_follows_the_flow() {
        let mut req = valid_request();
        req.order_type = Some("dine-in".into());
        req.room_number = None;
        let errs = validate(&req).unwrap_err();
        assert!(errs.iter().any(|e| e.contains("tableNumber")));

        req.table_number = Some("7".into());
        assert!(validate(&req).is_ok());

        // Takeaway needs no target
        let mut req = valid_request();
        req.order_type = Some("takeaway".into());
        req.room_number = None;
        assert!(validate(&req).is_ok());
    }

    #[test]
    fn coupon_fields_are_type_checked() {
        let mut req = valid_request();
        req.coupon_code = Some("save10".into());
        req.coupon_discount_type = Some("bogus".into());
        let errs = validate(&req).unwrap_err();
        assert!(errs.iter().any(|e| e.contains("couponDiscountType")));

        let mut req = valid_request();
        req.coupon_code = Some(" save10 ".into());
        let v = validate(&req).unwrap();
        assert_eq!(v.coupon_code.as_deref(), Some("SAVE10"));
    }
}
