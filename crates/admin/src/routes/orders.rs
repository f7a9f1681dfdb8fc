//! Order page handlers (read-only).

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use rust_decimal::Decimal;
use tracing::instrument;

use crate::catalog::{OrderItem, OrderSummary};
use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Order line display data.
#[derive(Clone)]
pub struct OrderItemView {
    /// Product title, or a placeholder when the product was deleted.
    pub product: String,
    pub price: Option<String>,
    pub quantity: Option<i64>,
}

impl From<OrderItem> for OrderItemView {
    fn from(item: OrderItem) -> Self {
        Self {
            product: item
                .product
                .unwrap_or_else(|| "(deleted product)".to_string()),
            price: item.price.map(format_price),
            quantity: item.quantity,
        }
    }
}

/// Order row display data.
#[derive(Clone)]
pub struct OrderView {
    pub order_number: String,
    pub total_amount: Option<String>,
    pub status: Option<String>,
    pub items: Vec<OrderItemView>,
}

impl From<OrderSummary> for OrderView {
    fn from(summary: OrderSummary) -> Self {
        Self {
            order_number: summary.order_number,
            total_amount: summary.total_amount.map(format_price),
            status: summary.order_status,
            items: summary.order_items.into_iter().map(OrderItemView::from).collect(),
        }
    }
}

fn format_price(price: Decimal) -> String {
    format!("${:.2}", price.round_dp(2))
}

/// Order listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub orders: Vec<OrderView>,
}

/// Display the order listing page.
///
/// # Errors
///
/// Returns 500 if the store request fails.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<OrdersIndexTemplate, AppError> {
    let orders = state.catalog().orders().await?;
    Ok(OrdersIndexTemplate {
        orders: orders.into_iter().map(OrderView::from).collect(),
    })
}
