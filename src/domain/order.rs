use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MenuItemId;

/// Body of an order-creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
}

/// What the backend sends back once it has accepted an order.
///
/// Both fields are optional; an accepted order whose body cannot be read is
/// represented by `OrderAck::default()`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OrderAck {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub order: Option<OrderReceipt>,
}

impl OrderAck {
    pub fn daily_order_id(&self) -> Option<u32> {
        self.order.as_ref().map(|order| order.daily_order_id)
    }
}

/// The stored order as echoed by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderReceipt {
    pub order_id: u64,
    pub daily_order_id: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub status: String,
}
