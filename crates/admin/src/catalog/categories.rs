//! Category read operations.
//!
//! Categories are read-only in this admin: the listing page and the add-form
//! dropdown. The denormalized `products` count on category documents is
//! maintained outside this system and is not treated as authoritative.

use serde::Deserialize;
use tracing::instrument;

use comforty_core::CategoryId;

use crate::sanity::SanityError;

use super::Catalog;

/// Listing projection with image dereferenced to a URL.
const CATEGORIES_QUERY: &str =
    r#"*[_type == "categories"]{_id, title, products, "image": image.asset->url}"#;

/// Minimal projection for the add-form category dropdown.
const CATEGORY_OPTIONS_QUERY: &str = r#"*[_type == "categories"]{_id, title}"#;

/// A category row on the listing page.
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySummary {
    /// Store-assigned document ID.
    #[serde(rename = "_id")]
    pub id: CategoryId,
    #[serde(default, deserialize_with = "super::null_default")]
    pub title: String,
    /// Denormalized product count, written by another process. May be stale.
    #[serde(default, rename = "products")]
    pub product_count: Option<i64>,
    /// Resolved image URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// A category choice for the product add form.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryOption {
    /// Store-assigned document ID.
    #[serde(rename = "_id")]
    pub id: CategoryId,
    #[serde(default, deserialize_with = "super::null_default")]
    pub title: String,
}

impl Catalog {
    /// List all categories for the listing page.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<CategorySummary>, SanityError> {
        Ok(self
            .sanity
            .query(CATEGORIES_QUERY, &[])
            .await?
            .unwrap_or_default())
    }

    /// List category IDs and titles for the add-form dropdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn category_options(&self) -> Result<Vec<CategoryOption>, SanityError> {
        Ok(self
            .sanity
            .query(CATEGORY_OPTIONS_QUERY, &[])
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_summary_deserializes() {
        let body = json!({
            "_id": "cat-chairs",
            "title": "Chairs",
            "products": 12,
            "image": "https://cdn.example-store.net/images/chairs.jpg"
        });
        let category: CategorySummary = serde_json::from_value(body).unwrap();
        assert_eq!(category.title, "Chairs");
        assert_eq!(category.product_count, Some(12));
    }

    #[test]
    fn test_category_summary_tolerates_missing_count() {
        let body = json!({"_id": "cat-new", "title": null, "products": null, "image": null});
        let category: CategorySummary = serde_json::from_value(body).unwrap();
        assert_eq!(category.title, "");
        assert_eq!(category.product_count, None);
    }
}
