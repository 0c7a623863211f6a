//! Coupon lifecycle and settlement tests

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{get, post};
use serde_json::{Value, json};

fn order_with_coupon(code: &str) -> Value {
    json!({
        "customerName": "Ravi Kumar",
        "customerPhone": "8883334444",
        "orderType": "takeaway",
        "items": [
            { "id": "food:paneer", "name": "Paneer Tikka", "price": 200.0, "quantity": 2 }
        ],
        "subtotal": 400.0,
        "gst": 20.0,
        "discountAmount": 0.0,
        "total": 420.0,
        "couponCode": code
    })
}

fn coupon_payload(code: &str, discount_type: &str, value: f64) -> Value {
    json!({
        "code": code,
        "discountType": discount_type,
        "value": value,
        "expiryDate": (Utc::now() + Duration::days(30)).to_rfc3339()
    })
}

async fn create_coupon(app: &axum::Router, payload: Value) -> Value {
    let (status, body) = post(app, "/api/coupons", payload).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn percentage_coupon_discounts_the_gross() {
    let app = common::test_app().await;
    create_coupon(&app, coupon_payload("SAVE10", "percentage", 10.0)).await;

    // 10% of 420 gross
    let (status, body) = post(&app, "/api/orders", order_with_coupon("save10")).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["discountAmount"], json!(42.0));
    assert_eq!(body["data"]["total"], json!(378.0));
    assert_eq!(body["data"]["appliedCoupon"]["code"], json!("SAVE10"));

    // Redemption is bookkept on the coupon
    let (_, coupons) = get(&app, "/api/coupons").await;
    let coupon = &coupons["data"][0];
    assert_eq!(coupon["usedCount"], json!(1));
    assert_eq!(coupon["usageHistory"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn fixed_coupon_is_clamped_to_the_gross() {
    let app = common::test_app().await;
    create_coupon(&app, coupon_payload("BIGOFF", "fixed", 1000.0)).await;

    let (status, body) = post(&app, "/api/orders", order_with_coupon("BIGOFF")).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["discountAmount"], json!(420.0));
    assert_eq!(body["data"]["total"], json!(0.0));
}

#[tokio::test]
async fn unknown_coupon_is_rejected() {
    let app = common::test_app().await;
    let (status, body) = post(&app, "/api/orders", order_with_coupon("NOPE")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Coupon not found"));
}

#[tokio::test]
async fn expired_coupon_is_rejected_and_deactivated() {
    let app = common::test_app().await;
    let mut payload = coupon_payload("OLD", "percentage", 10.0);
    payload["expiryDate"] = json!((Utc::now() - Duration::days(1)).to_rfc3339());
    let created = create_coupon(&app, payload).await;
    let id = common::id_of(&created);

    let (status, body) = post(&app, "/api/orders", order_with_coupon("OLD")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Coupon is no longer valid"));

    // Lazily flipped inactive by the failed check
    let (_, body) = get(&app, &format!("/api/coupons/{id}")).await;
    assert_eq!(body["data"]["isActive"], json!(false));
}

#[tokio::test]
async fn usage_limit_caps_redemptions() {
    let app = common::test_app().await;
    let mut payload = coupon_payload("ONCE", "fixed", 50.0);
    payload["usageLimit"] = json!(1);
    let created = create_coupon(&app, payload).await;
    let id = common::id_of(&created);

    let (status, _) = post(&app, "/api/orders", order_with_coupon("ONCE")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(&app, "/api/orders", order_with_coupon("ONCE")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("usage limit"));

    // The placement transaction flipped the coupon inactive at its limit;
    // later attempts still report the limit, not a generic invalidity
    let (_, body) = get(&app, &format!("/api/coupons/{id}")).await;
    assert_eq!(body["data"]["isActive"], json!(false));

    let (status, body) = post(&app, "/api/orders", order_with_coupon("ONCE")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("usage limit"));
}

#[tokio::test]
async fn minimum_order_amount_is_enforced() {
    let app = common::test_app().await;
    let mut payload = coupon_payload("MIN1K", "percentage", 15.0);
    payload["minOrderAmount"] = json!(1000.0);
    create_coupon(&app, payload).await;

    let (status, body) = post(&app, "/api/orders", order_with_coupon("MIN1K")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("below the coupon minimum"));
}

#[tokio::test]
async fn client_submitted_discount_is_ignored_when_coupon_applies() {
    let app = common::test_app().await;
    create_coupon(&app, coupon_payload("SAVE10", "percentage", 10.0)).await;

    // Client claims a 200 discount; the coupon's own value wins
    let mut order = order_with_coupon("SAVE10");
    order["discountAmount"] = json!(200.0);
    let (status, body) = post(&app, "/api/orders", order).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["discountAmount"], json!(42.0));
    assert_eq!(body["data"]["total"], json!(378.0));
}

#[tokio::test]
async fn validate_endpoint_previews_without_consuming() {
    let app = common::test_app().await;
    create_coupon(&app, coupon_payload("SAVE10", "percentage", 10.0)).await;

    let (status, body) = post(
        &app,
        "/api/coupons/validate",
        json!({ "code": "save10", "orderAmount": 420.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["discountAmount"], json!(42.0));
    assert_eq!(body["data"]["total"], json!(378.0));
    assert_eq!(body["data"]["coupon"]["code"], json!("SAVE10"));

    // Preview leaves the counter untouched
    let (_, coupons) = get(&app, "/api/coupons").await;
    assert_eq!(coupons["data"][0]["usedCount"], json!(0));
}

#[tokio::test]
async fn duplicate_code_conflicts() {
    let app = common::test_app().await;
    create_coupon(&app, coupon_payload("TWICE", "fixed", 10.0)).await;

    // Codes are uppercased before the uniqueness check
    let (status, body) = post(&app, "/api/coupons", coupon_payload("twice", "fixed", 20.0)).await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
}

#[tokio::test]
async fn coupon_creation_is_validated() {
    let app = common::test_app().await;

    let (status, body) = post(
        &app,
        "/api/coupons",
        coupon_payload("BAD", "percentage", 150.0),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        common::errors_of(&body)
            .iter()
            .any(|e| e.contains("exceed 100"))
    );

    let (status, _) = post(&app, "/api/coupons", coupon_payload("", "fixed", 10.0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
