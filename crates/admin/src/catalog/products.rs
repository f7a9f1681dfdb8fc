//! Product CRUD operations and read models.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use comforty_core::{AssetId, CategoryId, ProductId, TagList};

use crate::sanity::{ImageField, Mutation, Reference, SanityError};

use super::Catalog;

/// Document type tag for products.
const PRODUCT_TYPE: &str = "products";

/// List projection: one row per product with the image dereferenced to a URL.
const PRODUCTS_QUERY: &str =
    r#"*[_type == "products"]{_id, title, price, "image": image.asset->url}"#;

/// Single-product projection with every editable field and a resolved image
/// URL. `[0]` yields `null` when the ID has no match.
const PRODUCT_BY_ID_QUERY: &str = r#"*[_type == "products" && _id == $id][0]{_id, title, price, priceWithoutDiscount, badge, description, inventory, tags, "image": image.asset->url}"#;

// =============================================================================
// Read models
// =============================================================================

/// A product row on the listing page.
///
/// Legacy documents may be missing fields, so everything except the ID is
/// tolerated as absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSummary {
    /// Store-assigned document ID.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Product title.
    #[serde(default, deserialize_with = "super::null_default")]
    pub title: String,
    /// Current price.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    /// Resolved image URL, when an image asset is attached.
    #[serde(default)]
    pub image: Option<String>,
}

/// A full product as returned to readers: all fields plus the image asset
/// reference flattened into a plain URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned document ID.
    #[serde(rename = "_id")]
    pub id: ProductId,
    #[serde(default, deserialize_with = "super::null_default")]
    pub title: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    /// Pre-discount price, informational only.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_without_discount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub description: String,
    #[serde(default)]
    pub inventory: Option<i64>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub tags: TagList,
    /// Resolved image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A product document as stored: the image is still an asset reference, not a
/// resolved URL. This is what Create and Update hand back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    /// Store-assigned document ID.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Always `"products"`.
    #[serde(rename = "_type")]
    pub type_tag: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_without_discount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub inventory: Option<i64>,
    #[serde(default)]
    pub tags: TagList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Reference>,
}

// =============================================================================
// Write commands
// =============================================================================

/// Validated command for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub title: String,
    pub price: Decimal,
    pub price_without_discount: Option<Decimal>,
    pub badge: Option<String>,
    pub description: String,
    pub inventory: i64,
    pub tags: TagList,
    /// Uploaded image asset to reference.
    pub image: Option<AssetId>,
    /// Category document to reference (write-only: never read back).
    pub category: Option<CategoryId>,
}

impl NewProduct {
    /// Build the document to create, with the fixed type tag and typed
    /// references for the image asset and category.
    fn to_document(&self) -> Result<Value, serde_json::Error> {
        let mut doc = serde_json::Map::new();
        doc.insert("_type".to_string(), Value::String(PRODUCT_TYPE.to_string()));
        doc.insert("title".to_string(), Value::String(self.title.clone()));
        doc.insert("price".to_string(), decimal_json(self.price));
        if let Some(original) = self.price_without_discount {
            doc.insert("priceWithoutDiscount".to_string(), decimal_json(original));
        }
        if let Some(badge) = &self.badge {
            doc.insert("badge".to_string(), Value::String(badge.clone()));
        }
        doc.insert(
            "description".to_string(),
            Value::String(self.description.clone()),
        );
        doc.insert("inventory".to_string(), Value::from(self.inventory));
        doc.insert("tags".to_string(), serde_json::to_value(&self.tags)?);
        if let Some(asset) = &self.image {
            doc.insert(
                "image".to_string(),
                serde_json::to_value(ImageField::from_asset(asset.as_str()))?,
            );
        }
        if let Some(category) = &self.category {
            doc.insert(
                "category".to_string(),
                serde_json::to_value(Reference::to(category.as_str()))?,
            );
        }
        Ok(Value::Object(doc))
    }
}

/// Validated partial-merge command: only provided fields are written.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub price_without_discount: Option<Decimal>,
    pub badge: Option<String>,
    pub description: Option<String>,
    pub inventory: Option<i64>,
    pub tags: Option<TagList>,
}

impl ProductPatch {
    /// Whether the patch would touch nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.price_without_discount.is_none()
            && self.badge.is_none()
            && self.description.is_none()
            && self.inventory.is_none()
            && self.tags.is_none()
    }

    /// Build the `set` map for the patch mutation. Absent fields do not
    /// appear, so the store merges instead of replacing.
    #[must_use]
    pub fn to_set_map(&self) -> serde_json::Map<String, Value> {
        let mut set = serde_json::Map::new();
        if let Some(title) = &self.title {
            set.insert("title".to_string(), Value::String(title.clone()));
        }
        if let Some(price) = self.price {
            set.insert("price".to_string(), decimal_json(price));
        }
        if let Some(original) = self.price_without_discount {
            set.insert("priceWithoutDiscount".to_string(), decimal_json(original));
        }
        if let Some(badge) = &self.badge {
            set.insert("badge".to_string(), Value::String(badge.clone()));
        }
        if let Some(description) = &self.description {
            set.insert(
                "description".to_string(),
                Value::String(description.clone()),
            );
        }
        if let Some(inventory) = self.inventory {
            set.insert("inventory".to_string(), Value::from(inventory));
        }
        if let Some(tags) = &self.tags {
            set.insert(
                "tags".to_string(),
                serde_json::to_value(tags).unwrap_or(Value::Null),
            );
        }
        set
    }
}

/// Render a decimal as a plain JSON number.
fn decimal_json(value: Decimal) -> Value {
    serde_json::Number::from_f64(value.to_f64().unwrap_or_default())
        .map_or(Value::Null, Value::Number)
}

// =============================================================================
// Facade operations
// =============================================================================

impl Catalog {
    /// List all products for the listing page.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<ProductSummary>, SanityError> {
        Ok(self
            .sanity
            .query(PRODUCTS_QUERY, &[])
            .await?
            .unwrap_or_default())
    }

    /// Fetch one product with its image reference resolved to a URL.
    ///
    /// Returns `None` when no document has the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Option<Product>, SanityError> {
        self.sanity
            .query(
                PRODUCT_BY_ID_QUERY,
                &[("id", Value::String(id.as_str().to_string()))],
            )
            .await
    }

    /// Create a product and return the document as stored, including the
    /// store-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or returns no document.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_product(&self, input: &NewProduct) -> Result<ProductDocument, SanityError> {
        let document = input.to_document()?;
        let response = self.sanity.mutate(&[Mutation::Create(document)]).await?;

        let created = response
            .results
            .into_iter()
            .find_map(|result| result.document)
            .ok_or_else(|| SanityError::Api {
                status: 200,
                message: "create committed but returned no document".to_string(),
            })?;

        Ok(serde_json::from_value(created)?)
    }

    /// Apply a partial-field merge to an existing product.
    ///
    /// Returns `None` when the store reports the patch did not apply (e.g.
    /// the document does not exist).
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self, patch), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<ProductDocument>, SanityError> {
        let mutation = Mutation::patch_set(id.as_str(), patch.to_set_map());
        let response = self.sanity.mutate(&[mutation]).await?;

        match response.results.into_iter().find_map(|r| r.document) {
            Some(document) => Ok(Some(serde_json::from_value(document)?)),
            None => Ok(None),
        }
    }

    /// Delete a product by ID.
    ///
    /// Returns `false` when the store reports nothing was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<bool, SanityError> {
        let response = self.sanity.mutate(&[Mutation::delete(id.as_str())]).await?;

        Ok(response
            .results
            .iter()
            .any(|result| result.operation.as_deref() == Some("delete")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_product() -> NewProduct {
        NewProduct {
            title: "Library Stool".to_string(),
            price: Decimal::new(125, 1),
            price_without_discount: Some(Decimal::new(20, 0)),
            badge: Some("New".to_string()),
            description: "Solid oak".to_string(),
            inventory: 4,
            tags: TagList::parse("modern, wood"),
            image: Some(AssetId::new("image-a1b2-800x600-jpg")),
            category: Some(CategoryId::new("cat-stools")),
        }
    }

    #[test]
    fn test_new_product_document_shape() {
        let doc = new_product().to_document().unwrap();
        assert_eq!(doc["_type"], json!("products"));
        assert_eq!(doc["title"], json!("Library Stool"));
        assert_eq!(doc["price"], json!(12.5));
        assert_eq!(doc["priceWithoutDiscount"], json!(20.0));
        assert_eq!(doc["inventory"], json!(4));
        assert_eq!(doc["tags"], json!(["modern", "wood"]));
        assert_eq!(
            doc["image"],
            json!({
                "_type": "image",
                "asset": {"_type": "reference", "_ref": "image-a1b2-800x600-jpg"}
            })
        );
        assert_eq!(
            doc["category"],
            json!({"_type": "reference", "_ref": "cat-stools"})
        );
    }

    #[test]
    fn test_new_product_document_omits_absent_optionals() {
        let input = NewProduct {
            price_without_discount: None,
            badge: None,
            image: None,
            category: None,
            ..new_product()
        };
        let doc = input.to_document().unwrap();
        let object = doc.as_object().unwrap();
        assert!(!object.contains_key("priceWithoutDiscount"));
        assert!(!object.contains_key("badge"));
        assert!(!object.contains_key("image"));
        assert!(!object.contains_key("category"));
    }

    #[test]
    fn test_patch_set_map_title_only() {
        let patch = ProductPatch {
            title: Some("Renamed".to_string()),
            ..ProductPatch::default()
        };
        let set = patch.to_set_map();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("title"), Some(&json!("Renamed")));
    }

    #[test]
    fn test_patch_set_map_full() {
        let patch = ProductPatch {
            title: Some("Renamed".to_string()),
            price: Some(Decimal::new(999, 2)),
            price_without_discount: Some(Decimal::new(1999, 2)),
            badge: Some("Sale".to_string()),
            description: Some("Updated".to_string()),
            inventory: Some(7),
            tags: Some(TagList::parse("a, b")),
        };
        let set = patch.to_set_map();
        assert_eq!(set.len(), 7);
        assert_eq!(set.get("price"), Some(&json!(9.99)));
        assert_eq!(set.get("tags"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_empty_patch_detected() {
        assert!(ProductPatch::default().is_empty());
        assert!(
            !ProductPatch {
                inventory: Some(0),
                ..ProductPatch::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn test_product_deserializes_resolved_image() {
        let body = json!({
            "_id": "prod-1",
            "title": "Library Stool",
            "price": 12.5,
            "priceWithoutDiscount": 20.0,
            "badge": "New",
            "description": "Solid oak",
            "inventory": 4,
            "tags": ["modern", "wood"],
            "image": "https://cdn.example-store.net/images/a1b2.jpg"
        });
        let product: Product = serde_json::from_value(body).unwrap();
        assert_eq!(product.price, Some(Decimal::new(125, 1)));
        assert_eq!(
            product.image.as_deref(),
            Some("https://cdn.example-store.net/images/a1b2.jpg")
        );
    }

    #[test]
    fn test_product_tolerates_sparse_legacy_document() {
        // GROQ projections emit explicit nulls for attributes a doc lacks
        let body = json!({
            "_id": "prod-legacy",
            "title": "Old chair",
            "price": null,
            "description": null,
            "tags": null,
            "image": null
        });
        let product: Product = serde_json::from_value(body).unwrap();
        assert_eq!(product.price, None);
        assert!(product.tags.is_empty());
        assert_eq!(product.image, None);
    }

    #[test]
    fn test_product_document_roundtrip() {
        let body = json!({
            "_id": "prod-1",
            "_type": "products",
            "_createdAt": "2026-01-04T12:00:00Z",
            "title": "Library Stool",
            "price": 12.5,
            "description": "Solid oak",
            "inventory": 4,
            "tags": ["modern"],
            "image": {
                "_type": "image",
                "asset": {"_type": "reference", "_ref": "image-a1b2-800x600-jpg"}
            },
            "category": {"_type": "reference", "_ref": "cat-stools"}
        });
        let document: ProductDocument = serde_json::from_value(body).unwrap();
        assert_eq!(document.id, ProductId::new("prod-1"));
        assert_eq!(document.type_tag, "products");
        assert_eq!(
            document.image.as_ref().map(|i| i.asset.target.as_str()),
            Some("image-a1b2-800x600-jpg")
        );

        let wire = serde_json::to_value(&document).unwrap();
        assert_eq!(wire["price"], json!(12.5));
        assert_eq!(wire["category"]["_ref"], json!("cat-stools"));
    }
}
