//! Order domain and wire types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clothy_core::{AddressId, OrderId, OrderItemId, PaymentMethod, UserId, UtrNumber};

use super::address::AddressSnapshot;

/// An order header.
///
/// `status` is free text: it starts at `"pending"` and admins may move it
/// through whatever workflow the store uses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHeader {
    pub id: OrderId,
    pub owner_id: UserId,
    pub total_amount: Decimal,
    pub status: String,
    /// Copy of the shipping address at order time; `None` when checkout did
    /// not resolve one.
    pub shipping_address: Option<AddressSnapshot>,
    pub payment_method: PaymentMethod,
    /// Recorded only for UPI orders.
    pub utr_number: Option<UtrNumber>,
    pub payment_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One line of an order.
///
/// Owned by its header: created during assembly, never mutated, deleted only
/// when the header is deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// Order line enriched with its computed total, for read-side responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub id: OrderItemId,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    /// `unit_price * quantity`, derived at read time and never stored.
    pub total: Decimal,
}

impl From<OrderItem> for OrderItemView {
    fn from(item: OrderItem) -> Self {
        let total = item.unit_price * Decimal::from(item.quantity);
        Self {
            id: item.id,
            product_name: item.product_name,
            unit_price: item.unit_price,
            quantity: item.quantity,
            total,
        }
    }
}

/// An order header with its nested line items.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub header: OrderHeader,
    pub items: Vec<OrderItemView>,
}

/// One submitted checkout line.
///
/// Name and price are trusted from the caller; they are not re-validated
/// against the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutItem {
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// Request body for placing an order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
    pub total_amount: Option<Decimal>,
    pub shipping_address_id: Option<AddressId>,
    pub payment_method: Option<PaymentMethod>,
    pub utr_number: Option<String>,
}
