//! Order read operations.
//!
//! Orders are read-only in this admin. Status values are free-form text from
//! whatever wrote the order; this system does not constrain them.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use comforty_core::OrderId;

use crate::sanity::SanityError;

use super::Catalog;

/// Listing projection: each order item's product reference is dereferenced to
/// the product title.
const ORDERS_QUERY: &str = r#"*[_type == "orders"]{_id, orderNumber, totalAmount, orderStatus, orderItems[]{"product": product->title, price, quantity}}"#;

/// One line of an order: a product title with unit price and quantity.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    /// Referenced product's title. `None` when the product was deleted
    /// after the order was placed (no cascading deletes).
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// An order row on the listing page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Store-assigned document ID.
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(default, deserialize_with = "super::null_default")]
    pub order_number: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
    /// Free-form status text, unconstrained by this system.
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default, deserialize_with = "super::null_default")]
    pub order_items: Vec<OrderItem>,
}

impl Catalog {
    /// List all orders for the listing page.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<OrderSummary>, SanityError> {
        Ok(self
            .sanity
            .query(ORDERS_QUERY, &[])
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
    fn test_order_summary_deserializes() {
        let body = json!({
            "_id": "order-1",
            "orderNumber": "CF-1042",
            "totalAmount": 89.97,
            "orderStatus": "shipped",
            "orderItems": [
                {"product": "Library Stool", "price": 29.99, "quantity": 3}
            ]
        });
        let order: OrderSummary = serde_json::from_value(body).unwrap();
        assert_eq!(order.order_number, "CF-1042");
        assert_eq!(order.order_status.as_deref(), Some("shipped"));
        assert_eq!(order.order_items.len(), 1);
        assert_eq!(order.order_items[0].quantity, Some(3));
    }

    #[test]
    fn test_order_item_tolerates_deleted_product() {
        let body = json!({"product": null, "price": 29.99, "quantity": 1});
        let item: OrderItem = serde_json::from_value(body).unwrap();
        assert_eq!(item.product, None);
    }

    #[test]
    fn test_order_summary_tolerates_missing_items() {
        let body = json!({"_id": "order-2", "orderNumber": null, "orderItems": null});
        let order: OrderSummary = serde_json::from_value(body).unwrap();
        assert_eq!(order.order_number, "");
        assert!(order.order_items.is_empty());
    }
}
