//! Product payload parsing and validation.
//!
//! Both the JSON API and the HTML forms deserialize into the same raw request
//! types here, and a single validation step coerces them into typed commands
//! for the catalog facade. Malformed numeric or missing required fields are
//! rejected before any store call; nothing un-validated is ever persisted.
//!
//! Numeric fields accept either JSON numbers or strings (forms always send
//! strings), and tags accept either a comma-separated string or an
//! already-split array - normalized to one internal [`TagList`] contract.

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use comforty_core::{AssetId, CategoryId, TagList};

use crate::catalog::{NewProduct, ProductPatch};

/// A numeric field as submitted: a JSON number or a human-typed string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// Already-numeric JSON value.
    Number(f64),
    /// String form, e.g. from an HTML input.
    Text(String),
}

impl RawNumber {
    fn is_blank(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Text(s) => s.trim().is_empty(),
        }
    }
}

impl std::fmt::Display for RawNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Tags as submitted: a comma-separated string or an already-split array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTags {
    /// Human-editable comma form, e.g. `"modern, wood"`.
    Text(String),
    /// Pre-split array form.
    List(Vec<String>),
}

impl RawTags {
    /// Normalize either representation to an ordered, trimmed tag list.
    #[must_use]
    pub fn normalize(&self) -> TagList {
        match self {
            Self::Text(s) => TagList::parse(s),
            Self::List(tags) => tags
                .iter()
                .map(|tag| tag.trim().to_string())
                .collect::<Vec<_>>()
                .into(),
        }
    }
}

/// Payload for creating a product (POST /api/products and the add form).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<RawNumber>,
    #[serde(default)]
    pub price_without_discount: Option<RawNumber>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub inventory: Option<RawNumber>,
    #[serde(default)]
    pub tags: Option<RawTags>,
    /// ID of an already-uploaded image asset.
    #[serde(default)]
    pub image_ref: Option<String>,
    /// ID of the category document to reference.
    #[serde(default)]
    pub category: Option<String>,
}

/// Payload for a partial product update (PATCH /api/products/{id} and the
/// edit form). Absent fields are left untouched by the merge.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<RawNumber>,
    #[serde(default)]
    pub price_without_discount: Option<RawNumber>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub inventory: Option<RawNumber>,
    #[serde(default)]
    pub tags: Option<RawTags>,
}

/// A single rejected field with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Field name as it appears in the payload.
    pub field: &'static str,
    /// What was wrong with it.
    pub message: String,
}

/// Structured validation failure covering every rejected field at once.
#[derive(Debug, Error)]
#[error("{}", format_issues(.issues))]
pub struct ValidationError {
    /// All field issues found, in payload order.
    pub issues: Vec<FieldIssue>,
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.field, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl CreateProductRequest {
    /// Validate and coerce into a typed create command.
    ///
    /// # Errors
    ///
    /// Returns every field issue found; nothing partial is produced.
    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        let mut issues = Vec::new();

        let title = required_text(self.title.as_deref(), "title", &mut issues);
        let description = required_text(self.description.as_deref(), "description", &mut issues);
        let price = required_decimal(self.price.as_ref(), "price", &mut issues);
        let inventory = required_integer(self.inventory.as_ref(), "inventory", &mut issues);
        let price_without_discount = optional_decimal(
            self.price_without_discount.as_ref(),
            "priceWithoutDiscount",
            &mut issues,
        );

        if !issues.is_empty() {
            return Err(ValidationError { issues });
        }

        Ok(NewProduct {
            title: title.unwrap_or_default(),
            price: price.unwrap_or_default(),
            price_without_discount,
            badge: blank_to_none(self.badge.as_deref()),
            description: description.unwrap_or_default(),
            inventory: inventory.unwrap_or_default(),
            tags: self
                .tags
                .as_ref()
                .map(RawTags::normalize)
                .unwrap_or_default(),
            image: blank_to_none(self.image_ref.as_deref()).map(AssetId::new),
            category: blank_to_none(self.category.as_deref()).map(CategoryId::new),
        })
    }
}

impl UpdateProductRequest {
    /// Validate and coerce into a typed partial-merge command.
    ///
    /// # Errors
    ///
    /// Returns field issues for any malformed provided field, or a single
    /// issue when no field is provided at all.
    pub fn validate(&self) -> Result<ProductPatch, ValidationError> {
        let mut issues = Vec::new();

        let price = optional_decimal(self.price.as_ref(), "price", &mut issues);
        let price_without_discount = optional_decimal(
            self.price_without_discount.as_ref(),
            "priceWithoutDiscount",
            &mut issues,
        );
        let inventory = optional_integer(self.inventory.as_ref(), "inventory", &mut issues);

        if !issues.is_empty() {
            return Err(ValidationError { issues });
        }

        // Blank text fields mean "leave unchanged", badge included; clearing
        // a badge is done in the store, not through this form.
        let patch = ProductPatch {
            title: blank_to_none(self.title.as_deref()),
            price,
            price_without_discount,
            badge: blank_to_none(self.badge.as_deref()),
            description: blank_to_none(self.description.as_deref()),
            inventory,
            tags: self.tags.as_ref().map(RawTags::normalize),
        };

        if patch.is_empty() {
            return Err(ValidationError {
                issues: vec![FieldIssue {
                    field: "body",
                    message: "at least one product field must be provided".to_string(),
                }],
            });
        }

        Ok(patch)
    }
}

// =============================================================================
// Field helpers
// =============================================================================

fn blank_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn required_text(
    value: Option<&str>,
    field: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    blank_to_none(value).map_or_else(
        || {
            issues.push(FieldIssue {
                field,
                message: "is required".to_string(),
            });
            None
        },
        Some,
    )
}

fn parse_decimal(raw: &RawNumber) -> Result<Decimal, String> {
    let value = match raw {
        RawNumber::Number(n) => {
            Decimal::try_from(*n).map_err(|_| format!("{n} is not a representable amount"))?
        }
        RawNumber::Text(s) => s
            .trim()
            .parse::<Decimal>()
            .map_err(|_| format!("\"{}\" is not a number", s.trim()))?,
    };

    if value < Decimal::ZERO {
        return Err("must not be negative".to_string());
    }
    Ok(value)
}

fn parse_integer(raw: &RawNumber) -> Result<i64, String> {
    let value = match raw {
        RawNumber::Number(n) => {
            #[allow(clippy::cast_possible_truncation)]
            let truncated = *n as i64;
            #[allow(clippy::float_cmp)]
            if truncated as f64 != *n {
                return Err(format!("{n} is not a whole number"));
            }
            truncated
        }
        RawNumber::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("\"{}\" is not a whole number", s.trim()))?,
    };

    if value < 0 {
        return Err("must not be negative".to_string());
    }
    Ok(value)
}

fn required_decimal(
    value: Option<&RawNumber>,
    field: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> Option<Decimal> {
    let Some(raw) = value.filter(|raw| !raw.is_blank()) else {
        issues.push(FieldIssue {
            field,
            message: "is required".to_string(),
        });
        return None;
    };

    match parse_decimal(raw) {
        Ok(value) => Some(value),
        Err(message) => {
            issues.push(FieldIssue { field, message });
            None
        }
    }
}

fn optional_decimal(
    value: Option<&RawNumber>,
    field: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> Option<Decimal> {
    let raw = value.filter(|raw| !raw.is_blank())?;

    match parse_decimal(raw) {
        Ok(value) => Some(value),
        Err(message) => {
            issues.push(FieldIssue { field, message });
            None
        }
    }
}

fn required_integer(
    value: Option<&RawNumber>,
    field: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> Option<i64> {
    let Some(raw) = value.filter(|raw| !raw.is_blank()) else {
        issues.push(FieldIssue {
            field,
            message: "is required".to_string(),
        });
        return None;
    };

    match parse_integer(raw) {
        Ok(value) => Some(value),
        Err(message) => {
            issues.push(FieldIssue { field, message });
            None
        }
    }
}

fn optional_integer(
    value: Option<&RawNumber>,
    field: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> Option<i64> {
    let raw = value.filter(|raw| !raw.is_blank())?;

    match parse_integer(raw) {
        Ok(value) => Some(value),
        Err(message) => {
            issues.push(FieldIssue { field, message });
            None
        }
    }
}
