//! Cart domain and wire types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clothy_core::{CartLineId, UserId};

/// One line of a server-side cart.
///
/// Unique per (owner, product name): adding a product that is already in the
/// cart increments the existing line instead of creating a second one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: CartLineId,
    pub owner_id: UserId,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    /// Owner display name, denormalized onto the line at write time.
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for adding a product to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_name: String,
    pub price: Decimal,
    /// Initial quantity for a new line. A repeat add of the same product
    /// always increments the existing line by exactly one, whatever this says.
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

const fn default_quantity() -> i32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_defaults_quantity_to_one() {
        let req: AddToCartRequest =
            serde_json::from_str(r#"{"productName":"Tee","price":300}"#).expect("deserialize");
        assert_eq!(req.product_name, "Tee");
        assert_eq!(req.quantity, 1);
        assert_eq!(req.price, Decimal::from(300));
    }

    #[test]
    fn test_add_request_accepts_explicit_quantity() {
        let req: AddToCartRequest =
            serde_json::from_str(r#"{"productName":"Tee","price":"300","quantity":3}"#)
                .expect("deserialize");
        assert_eq!(req.quantity, 3);
    }
}
