//! Product JSON API handlers.
//!
//! The JSON surface and the HTML forms share the same raw request types and
//! the same validation step, so both reject a malformed payload with the same
//! 400 before anything reaches the store.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::instrument;

use comforty_core::ProductId;

use crate::catalog::{Product, ProductDocument};
use crate::error::AppError;
use crate::models::{CreateProductRequest, UpdateProductRequest};
use crate::state::AppState;

/// Fetch a single product with the image reference resolved to a URL.
///
/// # Errors
///
/// Returns 404 if the product does not exist, 500 if the store request fails.
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .product(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))?;

    Ok(Json(product))
}

/// Create a product and return the stored document.
///
/// # Errors
///
/// Returns 400 if the payload fails validation, 500 if the store request
/// fails.
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Json<ProductDocument>, AppError> {
    let command = payload.validate()?;
    let created = state.catalog().create_product(&command).await?;
    tracing::info!(product_id = %created.id, "Product created via API");
    Ok(Json(created))
}

/// Apply a partial update and return the patched document.
///
/// Only fields present in the payload are written; the store merges them
/// into the existing document.
///
/// # Errors
///
/// Returns 400 if the payload fails validation or the store rejected the
/// patch, 500 if the request fails.
#[instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductDocument>, AppError> {
    let id = ProductId::new(id);
    let patch = payload.validate()?;
    let updated = state
        .catalog()
        .update_product(&id, &patch)
        .await?
        .ok_or_else(|| AppError::BadRequest("Failed to update product".to_string()))?;

    tracing::info!(product_id = %id, "Product updated via API");
    Ok(Json(updated))
}

/// Delete a product.
///
/// # Errors
///
/// Returns 400 if the store deleted nothing, 500 if the request fails.
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = ProductId::new(id);
    let deleted = state.catalog().delete_product(&id).await?;
    if !deleted {
        return Err(AppError::BadRequest("Failed to delete product".to_string()));
    }

    tracing::info!(product_id = %id, "Product deleted via API");
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
