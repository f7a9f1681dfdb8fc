//! Wire types shared by content store documents.

use serde::{Deserialize, Serialize};

/// A reference to another document (`{"_type": "reference", "_ref": id}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Always `"reference"`.
    #[serde(rename = "_type")]
    pub type_tag: String,
    /// ID of the referenced document.
    #[serde(rename = "_ref")]
    pub target: String,
}

impl Reference {
    /// Build a reference to the given document ID.
    #[must_use]
    pub fn to(id: impl Into<String>) -> Self {
        Self {
            type_tag: "reference".to_string(),
            target: id.into(),
        }
    }
}

/// An image field wrapping a binary-asset reference.
///
/// Stored as `{"_type": "image", "asset": {"_type": "reference", "_ref": id}}`;
/// the asset reference resolves to a retrievable URL at read time via
/// `image.asset->url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageField {
    /// Always `"image"`.
    #[serde(rename = "_type")]
    pub type_tag: String,
    /// Reference to the uploaded image asset.
    pub asset: Reference,
}

impl ImageField {
    /// Build an image field from an uploaded asset ID.
    #[must_use]
    pub fn from_asset(asset_id: impl Into<String>) -> Self {
        Self {
            type_tag: "image".to_string(),
            asset: Reference::to(asset_id),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_wire_form() {
        let reference = Reference::to("cat-chairs");
        let wire = serde_json::to_value(&reference).unwrap();
        assert_eq!(wire, json!({"_type": "reference", "_ref": "cat-chairs"}));
    }

    #[test]
    fn test_image_field_wire_form() {
        let image = ImageField::from_asset("image-a1b2c3-800x600-jpg");
        let wire = serde_json::to_value(&image).unwrap();
        assert_eq!(
            wire,
            json!({
                "_type": "image",
                "asset": {"_type": "reference", "_ref": "image-a1b2c3-800x600-jpg"}
            })
        );
    }
}
