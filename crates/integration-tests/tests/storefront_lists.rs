//! Integration tests for the visitor lists (cart, favorites, compare).
//!
//! These tests require:
//! - A running storefront (cargo run -p threadline-storefront)
//! - The session table (tl-cli migrate sessions)
//! - At least five active products in the hosted catalog
//!
//! Run with: cargo test -p threadline-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use threadline_core::COMPARE_CAPACITY;
use threadline_integration_tests::Visitor;

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
#[ignore = "requires running storefront"]
async fn test_cart_add_update_clear() {
    let visitor = Visitor::new().expect("client");
    let ids = visitor.product_ids(1).await.expect("product listing");
    let id = ids[0];

    let (status, cart) = visitor
        .post("/cart/add", &json!({ "product_id": id }))
        .await
        .expect("add to cart");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["line_count"], 1);
    let moq = cart["items"][0]["min_order_quantity"].as_u64().expect("moq");
    assert_eq!(cart["items"][0]["quantity"].as_u64(), Some(moq));

    // Adding again merges into the same line
    let (_, cart) = visitor
        .post("/cart/add", &json!({ "product_id": id }))
        .await
        .expect("add again");
    assert_eq!(cart["line_count"], 1);
    assert_eq!(cart["items"][0]["quantity"].as_u64(), Some(moq * 2));

    let (_, cart) = visitor
        .post("/cart/update", &json!({ "product_id": id, "quantity": 0 }))
        .await
        .expect("update");
    assert_eq!(cart["line_count"], 0);

    let (_, count): (_, Value) = visitor.get("/cart/count").await.expect("count");
    assert_eq!(count["count"], 0);
}

#[tokio::test]
#[ignore = "requires running storefront"]
async fn test_checkout_requires_items() {
    let visitor = Visitor::new().expect("client");
    let (status, body) = visitor
        .post(
            "/cart/checkout",
            &json!({
                "contact_name": "Integration Test",
                "email": "integration@threadline.shop",
                "shipping_address": "1 Test Street",
            }),
        )
        .await
        .expect("checkout");

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["notice"]["level"], "error");
}

// ============================================================================
// Favorites
// ============================================================================

#[tokio::test]
#[ignore = "requires running storefront"]
async fn test_favorites_reject_duplicates() {
    let visitor = Visitor::new().expect("client");
    let id = visitor.product_ids(1).await.expect("product listing")[0];

    let (_, first) = visitor
        .post("/favorites/add", &json!({ "product_id": id }))
        .await
        .expect("add");
    assert_eq!(first["count"], 1);

    let (status, second) = visitor
        .post("/favorites/add", &json!({ "product_id": id }))
        .await
        .expect("add duplicate");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["count"], 1);
    assert_eq!(second["notice"]["level"], "warning");
}

// ============================================================================
// Compare
// ============================================================================

#[tokio::test]
#[ignore = "requires running storefront"]
async fn test_compare_stops_at_capacity() {
    let visitor = Visitor::new().expect("client");
    let ids = visitor
        .product_ids(COMPARE_CAPACITY + 1)
        .await
        .expect("product listing");
    assert!(ids.len() > COMPARE_CAPACITY, "catalog too small for this test");

    for id in &ids[..COMPARE_CAPACITY] {
        let (status, _) = visitor
            .post("/compare/add", &json!({ "product_id": id }))
            .await
            .expect("add to compare");
        assert_eq!(status, StatusCode::OK);
    }

    let (_, list) = visitor
        .post("/compare/add", &json!({ "product_id": ids[COMPARE_CAPACITY] }))
        .await
        .expect("add past capacity");
    assert_eq!(list["count"].as_u64(), Some(COMPARE_CAPACITY as u64));
    assert_eq!(list["is_full"], true);
    assert_eq!(list["notice"]["level"], "warning");
}

// ============================================================================
// Recommendations
// ============================================================================

#[tokio::test]
#[ignore = "requires running storefront"]
async fn test_recommendations_exclude_current_product() {
    let visitor = Visitor::new().expect("client");
    let id = visitor.product_ids(1).await.expect("product listing")[0];

    let (status, body): (_, Value) = visitor
        .get(&format!("/products/{id}/recommendations"))
        .await
        .expect("recommendations");
    assert_eq!(status, StatusCode::OK);

    let products = body["products"].as_array().expect("products array");
    assert!(products.len() <= 10);
    assert!(products.iter().all(|p| p["id"].as_i64() != Some(id.into())));
}

#[tokio::test]
#[ignore = "requires running storefront"]
async fn test_health() {
    let url = format!("{}/health", threadline_integration_tests::storefront_base_url());
    let resp = reqwest::get(url).await.expect("health request");
    assert_eq!(resp.status(), StatusCode::OK);
}
