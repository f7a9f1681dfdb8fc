//! Product page handlers (list, add, view, edit, delete).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use tracing::instrument;

use comforty_core::ProductId;

use crate::catalog::{CategoryOption, Product, ProductSummary};
use crate::error::AppError;
use crate::filters;
use crate::models::{CreateProductRequest, UpdateProductRequest, ValidationError};
use crate::state::AppState;

/// Product row display data for the listing page.
#[derive(Clone)]
pub struct ProductRowView {
    pub id: String,
    pub title: String,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl From<ProductSummary> for ProductRowView {
    fn from(summary: ProductSummary) -> Self {
        Self {
            id: summary.id.into_inner(),
            title: summary.title,
            price: summary.price.map(format_price),
            image: summary.image,
        }
    }
}

/// Full product display data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub title: String,
    pub price: Option<String>,
    pub price_without_discount: Option<String>,
    pub badge: Option<String>,
    pub description: String,
    pub inventory: Option<i64>,
    pub tags: Vec<String>,
    pub image: Option<String>,
}

impl From<Product> for ProductDetailView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into_inner(),
            title: product.title,
            price: product.price.map(format_price),
            price_without_discount: product.price_without_discount.map(format_price),
            badge: product.badge,
            description: product.description,
            inventory: product.inventory,
            tags: product.tags.as_slice().to_vec(),
            image: product.image,
        }
    }
}

/// Category dropdown option.
#[derive(Clone)]
pub struct CategoryOptionView {
    pub id: String,
    pub title: String,
}

impl From<CategoryOption> for CategoryOptionView {
    fn from(option: CategoryOption) -> Self {
        Self {
            id: option.id.into_inner(),
            title: option.title,
        }
    }
}

/// Editable form state: raw submitted values plus any validation errors,
/// so a rejected submission re-renders with everything the user typed.
#[derive(Clone, Default)]
pub struct ProductFormView {
    pub title: String,
    pub price: String,
    pub price_without_discount: String,
    pub badge: String,
    pub description: String,
    pub inventory: String,
    pub tags: String,
    pub image_ref: String,
    pub category: String,
    pub errors: Vec<String>,
}

impl ProductFormView {
    fn from_create_request(request: &CreateProductRequest, error: &ValidationError) -> Self {
        Self {
            title: request.title.clone().unwrap_or_default(),
            price: request.price.as_ref().map(ToString::to_string).unwrap_or_default(),
            price_without_discount: request
                .price_without_discount
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            badge: request.badge.clone().unwrap_or_default(),
            description: request.description.clone().unwrap_or_default(),
            inventory: request
                .inventory
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            tags: request
                .tags
                .as_ref()
                .map(|tags| tags.normalize().to_comma_string())
                .unwrap_or_default(),
            image_ref: request.image_ref.clone().unwrap_or_default(),
            category: request.category.clone().unwrap_or_default(),
            errors: format_errors(error),
        }
    }

    fn from_update_request(request: &UpdateProductRequest, error: &ValidationError) -> Self {
        Self {
            title: request.title.clone().unwrap_or_default(),
            price: request.price.as_ref().map(ToString::to_string).unwrap_or_default(),
            price_without_discount: request
                .price_without_discount
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            badge: request.badge.clone().unwrap_or_default(),
            description: request.description.clone().unwrap_or_default(),
            inventory: request
                .inventory
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            tags: request
                .tags
                .as_ref()
                .map(|tags| tags.normalize().to_comma_string())
                .unwrap_or_default(),
            image_ref: String::new(),
            category: String::new(),
            errors: format_errors(error),
        }
    }

    fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price: product.price.map(|p| p.to_string()).unwrap_or_default(),
            price_without_discount: product
                .price_without_discount
                .map(|p| p.to_string())
                .unwrap_or_default(),
            badge: product.badge.clone().unwrap_or_default(),
            description: product.description.clone(),
            inventory: product.inventory.map(|i| i.to_string()).unwrap_or_default(),
            tags: product.tags.to_comma_string(),
            image_ref: String::new(),
            category: String::new(),
            errors: Vec::new(),
        }
    }
}

fn format_errors(error: &ValidationError) -> Vec<String> {
    error
        .issues
        .iter()
        .map(|issue| format!("{}: {}", issue.field, issue.message))
        .collect()
}

fn format_price(price: Decimal) -> String {
    format!("${:.2}", price.round_dp(2))
}

// =============================================================================
// Templates
// =============================================================================

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductRowView>,
}

/// Add-product form page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/add.html")]
pub struct ProductAddTemplate {
    pub form: ProductFormView,
    pub categories: Vec<CategoryOptionView>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/view.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
}

/// Edit-product form page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/edit.html")]
pub struct ProductEditTemplate {
    pub id: String,
    pub form: ProductFormView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Redirect the dashboard root to the product listing.
pub async fn root() -> Redirect {
    Redirect::to("/products")
}

/// Display the product listing page.
///
/// # Errors
///
/// Returns 500 if the store request fails.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<ProductsIndexTemplate, AppError> {
    let products = state.catalog().products().await?;
    Ok(ProductsIndexTemplate {
        products: products.into_iter().map(ProductRowView::from).collect(),
    })
}

/// Display the add-product form.
///
/// # Errors
///
/// Returns 500 if the category dropdown cannot be loaded.
#[instrument(skip(state))]
pub async fn add_page(State(state): State<AppState>) -> Result<ProductAddTemplate, AppError> {
    let categories = state.catalog().category_options().await?;
    Ok(ProductAddTemplate {
        form: ProductFormView::default(),
        categories: categories.into_iter().map(CategoryOptionView::from).collect(),
    })
}

/// Handle the add-product form submission.
///
/// Validation failure re-renders the form with the submitted values and the
/// field errors; success creates the product and redirects to the listing.
///
/// # Errors
///
/// Returns 500 if the store request fails.
#[instrument(skip(state, form), fields(title = form.title.as_deref().unwrap_or("")))]
pub async fn add_submit(
    State(state): State<AppState>,
    Form(form): Form<CreateProductRequest>,
) -> Result<Response, AppError> {
    let command = match form.validate() {
        Ok(command) => command,
        Err(error) => {
            let categories = state.catalog().category_options().await?;
            let template = ProductAddTemplate {
                form: ProductFormView::from_create_request(&form, &error),
                categories: categories.into_iter().map(CategoryOptionView::from).collect(),
            };
            return Ok((StatusCode::BAD_REQUEST, template).into_response());
        }
    };

    let created = state.catalog().create_product(&command).await?;
    tracing::info!(product_id = %created.id, "Product created");
    Ok(Redirect::to("/products").into_response())
}

/// Display the read-only product detail page.
///
/// # Errors
///
/// Returns 404 if the product does not exist, 500 if the store request fails.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate, AppError> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .product(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))?;

    Ok(ProductShowTemplate {
        product: ProductDetailView::from(product),
    })
}

/// Display the edit-product form, prefilled from the store.
///
/// # Errors
///
/// Returns 404 if the product does not exist, 500 if the store request fails.
#[instrument(skip(state))]
pub async fn edit_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ProductEditTemplate, AppError> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .product(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))?;

    Ok(ProductEditTemplate {
        id: id.into_inner(),
        form: ProductFormView::from_product(&product),
    })
}

/// Handle the edit-product form submission.
///
/// # Errors
///
/// Returns 400 if the store rejects the patch, 500 if the request fails.
#[instrument(skip(state, form))]
pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UpdateProductRequest>,
) -> Result<Response, AppError> {
    let id = ProductId::new(id);
    let patch = match form.validate() {
        Ok(patch) => patch,
        Err(error) => {
            let template = ProductEditTemplate {
                id: id.into_inner(),
                form: ProductFormView::from_update_request(&form, &error),
            };
            return Ok((StatusCode::BAD_REQUEST, template).into_response());
        }
    };

    let updated = state.catalog().update_product(&id, &patch).await?;
    if updated.is_none() {
        return Err(AppError::BadRequest("Failed to update product".to_string()));
    }

    tracing::info!(product_id = %id, "Product updated");
    Ok(Redirect::to("/products").into_response())
}

/// Delete a product and redirect back to the listing.
///
/// The redirect re-fetches the listing from the store, so the page cannot
/// keep showing a product that no longer exists.
///
/// # Errors
///
/// Returns 400 if the store deleted nothing, 500 if the request fails.
#[instrument(skip(state))]
pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = ProductId::new(id);
    let deleted = state.catalog().delete_product(&id).await?;
    if !deleted {
        return Err(AppError::BadRequest("Failed to delete product".to_string()));
    }

    tracing::info!(product_id = %id, "Product deleted");
    Ok(Redirect::to("/products"))
}
