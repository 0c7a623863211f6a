//! End-to-end order placement and lifecycle tests

mod common;

use axum::http::StatusCode;
use common::{errors_of, get, id_of, patch, post};
use serde_json::{Value, json};

/// A valid room-service checkout: 2x200 + 20 GST = 420
fn valid_order() -> Value {
    json!({
        "customerName": "Asha Patel",
        "customerPhone": "9991112222",
        "customerEmail": "asha@example.com",
        "orderType": "Rooms",
        "roomNumber": "204",
        "items": [
            { "id": "food:paneer", "name": "Paneer Tikka", "price": 200.0, "quantity": 2 }
        ],
        "subtotal": 400.0,
        "gst": 20.0,
        "discountAmount": 0.0,
        "total": 420.0
    })
}

#[tokio::test]
async fn placing_a_valid_order_returns_created() {
    let app = common::test_app().await;

    let (status, body) = post(&app, "/api/orders", valid_order()).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Order created successfully"));

    let data = &body["data"];
    assert_eq!(data["status"], json!("confirmed"));
    assert_eq!(data["total"], json!(420.0));
    assert_eq!(data["discountAmount"], json!(0.0));
    assert_eq!(data["estimatedTime"], json!(30));
    assert_eq!(data["orderType"], json!("Rooms"));
    assert_eq!(data["roomNumber"], json!("204"));
    assert!(data["id"].as_str().is_some_and(|id| id.starts_with("order:")));
}

#[tokio::test]
async fn placed_order_is_retrievable_and_listed() {
    let app = common::test_app().await;

    let (_, created) = post(&app, "/api/orders", valid_order()).await;
    let id = id_of(&created);

    let (status, body) = get(&app, &format!("/api/orders/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!(id));

    let (status, body) = get(&app, "/api/orders?phone=9991112222").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["data"][0]["customerPhone"], json!("9991112222"));

    // Filter matching no orders
    let (status, body) = get(&app, "/api/orders?status=cancelled").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn unknown_status_filter_is_rejected() {
    let app = common::test_app().await;
    let (status, body) = get(&app, "/api/orders?status=bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn empty_items_fails_validation() {
    let app = common::test_app().await;

    let mut order = valid_order();
    order["items"] = json!([]);

    let (status, body) = post(&app, "/api/orders", order).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Validation failed"));
    assert!(
        errors_of(&body)
            .iter()
            .any(|e| e.contains("at least one item"))
    );
}

#[tokio::test]
async fn zero_quantity_cites_the_offending_item() {
    let app = common::test_app().await;

    let mut order = valid_order();
    order["items"][0]["quantity"] = json!(0);

    let (status, body) = post(&app, "/api/orders", order).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        errors_of(&body)
            .iter()
            .any(|e| e.contains("Item 1") && e.contains("quantity"))
    );
}

#[tokio::test]
async fn all_violations_are_listed_at_once() {
    let app = common::test_app().await;

    let (status, body) = post(&app, "/api/orders", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = errors_of(&body);
    assert!(errors.iter().any(|e| e.contains("customerName")));
    assert!(errors.iter().any(|e| e.contains("customerPhone")));
    assert!(errors.iter().any(|e| e.contains("orderType")));
    assert!(errors.len() >= 5, "expected the full list, got {errors:?}");
}

#[tokio::test]
async fn dine_in_requires_a_table_number() {
    let app = common::test_app().await;

    let mut order = valid_order();
    order["orderType"] = json!("dine-in");
    order.as_object_mut().unwrap().remove("roomNumber");

    let (status, body) = post(&app, "/api/orders", order).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(errors_of(&body).iter().any(|e| e.contains("tableNumber")));
}

#[tokio::test]
async fn repeat_orders_reuse_the_customer_by_phone() {
    let app = common::test_app().await;

    let (_, first) = post(&app, "/api/orders", valid_order()).await;
    let first_customer = first["data"]["customer"].as_str().unwrap().to_string();

    // Same phone, drifted name
    let mut again = valid_order();
    again["customerName"] = json!("Asha P.");
    let (_, second) = post(&app, "/api/orders", again).await;
    let second_customer = second["data"]["customer"].as_str().unwrap();

    assert_eq!(first_customer, second_customer);

    let (_, customers) = get(&app, "/api/customers?phone=9991112222").await;
    assert_eq!(customers["count"], json!(1));
    let customer = &customers["data"][0];
    // Name drift was written back; both orders are in the history
    assert_eq!(customer["name"], json!("Asha P."));
    assert_eq!(customer["orderedItems"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn status_transitions_follow_the_table() {
    let app = common::test_app().await;

    let (_, created) = post(&app, "/api/orders", valid_order()).await;
    let id = id_of(&created);
    let uri = format!("/api/orders/{id}/status");

    // confirmed -> preparing -> ready -> completed
    let (status, body) = patch(&app, &uri, json!({ "status": "preparing" })).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], json!("preparing"));

    // preparing -> completed skips ready
    let (status, body) = patch(&app, &uri, json!({ "status": "completed" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Illegal status transition")
    );

    let (status, _) = patch(&app, &uri, json!({ "status": "ready" })).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = patch(&app, &uri, json!({ "status": "completed" })).await;
    assert_eq!(status, StatusCode::OK);

    // completed is terminal
    let (status, _) = patch(&app, &uri, json!({ "status": "cancelled" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn payment_and_estimated_time_are_patchable() {
    let app = common::test_app().await;

    let (_, created) = post(&app, "/api/orders", valid_order()).await;
    let id = id_of(&created);

    let (status, body) = patch(
        &app,
        &format!("/api/orders/{id}/payment"),
        json!({ "method": "card", "status": "paid", "amount": 420.0, "transactionRef": "txn_1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["payment"]["status"], json!("paid"));
    assert_eq!(body["data"]["payment"]["amount"], json!(420.0));

    let (status, body) = patch(
        &app,
        &format!("/api/orders/{id}/estimated-time"),
        json!({ "estimatedTime": 45 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["estimatedTime"], json!(45));

    // Negative minutes are rejected
    let (status, _) = patch(
        &app,
        &format!("/api/orders/{id}/estimated-time"),
        json!({ "estimatedTime": -5 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_order_is_404() {
    let app = common::test_app().await;
    let (status, body) = get(&app, "/api/orders/nonexistent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}
