//! HTTP route handlers for the catalog admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (pings the store)
//!
//! # Pages
//! GET  /                           - Redirect to /products
//! GET  /products                   - Product listing
//! GET  /products/add               - Add-product form
//! POST /products/add               - Create product (form)
//! GET  /products/{id}              - Product detail
//! GET  /products/{id}/edit         - Edit-product form
//! POST /products/{id}/edit         - Update product (form)
//! POST /products/{id}/delete       - Delete product + redirect
//! GET  /categories                 - Category listing (read-only)
//! GET  /orders                     - Order listing (read-only)
//!
//! # JSON API
//! GET    /api/products/{id}        - Fetch product
//! POST   /api/products             - Create product
//! PATCH  /api/products/{id}        - Partial update
//! DELETE /api/products/{id}        - Delete product
//! ```

pub mod api;
pub mod categories;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product page routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/add", get(products::add_page).post(products::add_submit))
        .route("/{id}", get(products::show))
        .route(
            "/{id}/edit",
            get(products::edit_page).post(products::edit_submit),
        )
        .route("/{id}/delete", post(products::delete_submit))
}

/// Create the product JSON API router.
pub fn product_api_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(api::products::create_product))
        .route(
            "/{id}",
            get(api::products::get_product)
                .patch(api::products::update_product)
                .delete(api::products::delete_product),
        )
}

/// Create all routes for the admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Dashboard root
        .route("/", get(products::root))
        // Pages
        .nest("/products", product_routes())
        .route("/categories", get(categories::index))
        .route("/orders", get(orders::index))
        // JSON API
        .nest("/api/products", product_api_routes())
}
