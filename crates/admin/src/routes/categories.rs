//! Category page handlers (read-only).

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::catalog::CategorySummary;
use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Category card display data.
#[derive(Clone)]
pub struct CategoryView {
    pub title: String,
    /// Denormalized product count maintained in the store; may be stale.
    pub product_count: Option<i64>,
    pub image: Option<String>,
}

impl From<CategorySummary> for CategoryView {
    fn from(summary: CategorySummary) -> Self {
        Self {
            title: summary.title,
            product_count: summary.product_count,
            image: summary.image,
        }
    }
}

/// Category listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesIndexTemplate {
    pub categories: Vec<CategoryView>,
}

/// Display the category listing page.
///
/// # Errors
///
/// Returns 500 if the store request fails.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<CategoriesIndexTemplate, AppError> {
    let categories = state.catalog().categories().await?;
    Ok(CategoriesIndexTemplate {
        categories: categories.into_iter().map(CategoryView::from).collect(),
    })
}
