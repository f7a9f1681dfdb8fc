//! Integration tests for the product JSON API.
//!
//! These tests require:
//! - The admin server running (cargo run -p comforty-admin)
//! - Valid content store credentials in environment, pointed at a
//!   throwaway dataset (documents are created and deleted)
//!
//! Run with: cargo test -p comforty-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the admin (configurable via environment).
fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Unique product title so concurrent runs don't collide.
fn unique_title() -> String {
    format!("Integration Test Chair {}", Uuid::new_v4())
}

/// Test helper: create a product via the API and return its document.
async fn create_test_product(client: &Client, title: &str) -> Value {
    let base_url = admin_base_url();
    let resp = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({
            "title": title,
            "price": "129.99",
            "description": "Created by integration tests",
            "inventory": "5",
            "tags": "test, integration"
        }))
        .send()
        .await
        .expect("Failed to create test product");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to parse created product")
}

/// Test helper: delete a product, ignoring failures (cleanup path).
async fn delete_test_product(client: &Client, id: &str) {
    let base_url = admin_base_url();
    let _ = client
        .delete(format!("{base_url}/api/products/{id}"))
        .send()
        .await;
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_health() {
    let client = Client::new();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to reach health endpoint");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running admin server and store credentials"]
async fn test_readiness() {
    let client = Client::new();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to reach readiness endpoint");

    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// CRUD Round Trip
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and store credentials"]
async fn test_product_crud_round_trip() {
    let client = Client::new();
    let base_url = admin_base_url();
    let title = unique_title();

    // Create
    let created = create_test_product(&client, &title).await;
    let id = created["_id"].as_str().expect("created product has no _id");
    assert_eq!(created["title"], title);
    assert_eq!(created["price"].as_f64(), Some(129.99));

    // Get: stored fields come back, price as a number
    let resp = client
        .get(format!("{base_url}/api/products/{id}"))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(fetched["title"], title);
    assert_eq!(fetched["price"].as_f64(), Some(129.99));
    assert_eq!(
        fetched["tags"],
        json!(["test", "integration"]),
        "tags should be trimmed and order-preserved"
    );

    // Patch only the price: other fields must survive the merge
    let resp = client
        .patch(format!("{base_url}/api/products/{id}"))
        .json(&json!({ "price": 99.5 }))
        .send()
        .await
        .expect("Failed to patch product");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/api/products/{id}"))
        .send()
        .await
        .expect("Failed to refetch product");
    let patched: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(patched["price"].as_f64(), Some(99.5));
    assert_eq!(patched["title"], title);

    // Delete
    let resp = client
        .delete(format!("{base_url}/api/products/{id}"))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse delete response");
    assert_eq!(body["message"], "Product deleted successfully");

    // Get after delete: 404
    let resp = client
        .get(format!("{base_url}/api/products/{id}"))
        .send()
        .await
        .expect("Failed to fetch deleted product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert!(body["error"].is_string());
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and store credentials"]
async fn test_create_rejects_malformed_price() {
    let client = Client::new();
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/api/products"))
        .json(&json!({
            "title": unique_title(),
            "price": "abc",
            "description": "Should never be stored",
            "inventory": 1
        }))
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    let message = body["error"].as_str().expect("error body has no message");
    assert!(message.contains("price"), "error should name the field");
}

#[tokio::test]
#[ignore = "Requires running admin server and store credentials"]
async fn test_patch_rejects_empty_body() {
    let client = Client::new();
    let base_url = admin_base_url();
    let title = unique_title();

    let created = create_test_product(&client, &title).await;
    let id = created["_id"].as_str().unwrap().to_string();

    let resp = client
        .patch(format!("{base_url}/api/products/{id}"))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send patch request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    delete_test_product(&client, &id).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and store credentials"]
async fn test_get_unknown_id_is_404() {
    let client = Client::new();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/api/products/no-such-{}", Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to send get request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and store credentials"]
async fn test_listing_pages_render() {
    let client = Client::new();
    let base_url = admin_base_url();

    for path in ["/products", "/categories", "/orders", "/products/add"] {
        let resp = client
            .get(format!("{base_url}{path}"))
            .send()
            .await
            .expect("Failed to fetch page");
        assert_eq!(resp.status(), StatusCode::OK, "page {path} should render");

        let body = resp.text().await.expect("Failed to read page body");
        assert!(body.contains("<html"), "page {path} should be HTML");
    }
}
