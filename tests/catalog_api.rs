//! Catalog CRUD (categories, foods, tables, rooms, customers) and service endpoints

mod common;

use axum::http::StatusCode;
use common::{delete, get, id_of, patch, post, put};
use serde_json::json;

#[tokio::test]
async fn category_crud_round_trip() {
    let app = common::test_app().await;

    let (status, body) = post(
        &app,
        "/api/categories",
        json!({ "name": "Starters", "description": "Small plates", "sortOrder": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = id_of(&body);

    // Duplicate name conflicts
    let (status, _) = post(&app, "/api/categories", json!({ "name": "Starters" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = put(
        &app,
        &format!("/api/categories/{id}"),
        json!({ "description": "Appetisers" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["description"], json!("Appetisers"));
    assert_eq!(body["data"]["name"], json!("Starters"));

    let (status, body) = get(&app, "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));

    let (status, body) = delete(&app, &format!("/api/categories/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(true));

    let (status, _) = get(&app, &format!("/api/categories/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_category_name_is_rejected() {
    let app = common::test_app().await;
    let (status, _) = post(&app, "/api/categories", json!({ "name": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn food_items_require_an_existing_category() {
    let app = common::test_app().await;

    let (status, _) = post(
        &app,
        "/api/foods",
        json!({ "name": "Paneer Tikka", "price": 200.0, "category": "category:missing" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, category) = post(&app, "/api/categories", json!({ "name": "Starters" })).await;
    let category_id = id_of(&category);

    let (status, body) = post(
        &app,
        "/api/foods",
        json!({ "name": "Paneer Tikka", "price": 200.0, "category": category_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let food_id = id_of(&body);
    assert_eq!(body["data"]["isAvailable"], json!(true));

    // Category filter
    let (status, body) = get(&app, &format!("/api/foods?category={category_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));

    let (status, body) = put(
        &app,
        &format!("/api/foods/{food_id}"),
        json!({ "price": 220.0, "isAvailable": false }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], json!(220.0));
    assert_eq!(body["data"]["isAvailable"], json!(false));
}

#[tokio::test]
async fn negative_food_price_is_rejected() {
    let app = common::test_app().await;
    let (_, category) = post(&app, "/api/categories", json!({ "name": "Mains" })).await;

    let (status, _) = post(
        &app,
        "/api/foods",
        json!({ "name": "Dal", "price": -5.0, "category": id_of(&category) }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn table_and_room_crud() {
    let app = common::test_app().await;

    let (status, body) = post(&app, "/api/tables", json!({ "number": "T1", "capacity": 4 })).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let table_id = id_of(&body);
    assert_eq!(body["data"]["status"], json!("available"));

    let (status, body) = put(
        &app,
        &format!("/api/tables/{table_id}"),
        json!({ "status": "occupied" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("occupied"));

    let (status, body) = post(
        &app,
        "/api/rooms",
        json!({ "number": "204", "roomType": "Deluxe" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let room_id = id_of(&body);

    let (status, body) = get(&app, "/api/rooms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));

    let (status, _) = delete(&app, &format!("/api/rooms/{room_id}")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = get(&app, "/api/rooms").await;
    assert_eq!(body["count"], json!(0));
}

#[tokio::test]
async fn customer_create_and_cart_patch() {
    let app = common::test_app().await;

    let (status, body) = post(
        &app,
        "/api/customers",
        json!({ "name": "Asha", "phone": "9991112222", "email": "asha@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = id_of(&body);

    // Phone is the natural key
    let (status, _) = post(
        &app,
        "/api/customers",
        json!({ "name": "Someone Else", "phone": "9991112222" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = patch(
        &app,
        &format!("/api/customers/{id}/cart"),
        json!({ "items": [
            { "id": "food:dal", "name": "Dal Makhani", "price": 180.0, "quantity": 1 }
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["cart"].as_array().unwrap().len(), 1);

    // Empty list clears the cart
    let (status, body) = patch(
        &app,
        &format!("/api/customers/{id}/cart"),
        json!({ "items": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["cart"].as_array().unwrap().len(), 0);

    // Bad quantity is rejected
    let (status, _) = patch(
        &app,
        &format!("/api/customers/{id}/cart"),
        json!({ "items": [
            { "id": "food:dal", "name": "Dal Makhani", "price": 180.0, "quantity": 0 }
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_database_connectivity() {
    let app = common::test_app().await;
    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("ok"));
    assert_eq!(body["data"]["database"], json!("connected"));
}

#[tokio::test]
async fn sync_versions_track_mutations() {
    let app = common::test_app().await;

    let (_, body) = get(&app, "/api/sync/versions").await;
    let initial = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["resource"] == json!("category"))
        .unwrap()["version"]
        .clone();
    assert_eq!(initial, json!(0));

    post(&app, "/api/categories", json!({ "name": "Starters" })).await;

    let (_, body) = get(&app, "/api/sync/versions").await;
    let after = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["resource"] == json!("category"))
        .unwrap()["version"]
        .clone();
    assert_eq!(after, json!(1));
}
