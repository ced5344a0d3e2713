//! Checkout: turning a cart-shaped request into a persisted order.
//!
//! Validation happens up front and in a fixed order, so a request with
//! several problems always reports the same one. All writes happen after
//! validation, inside `OrderRepository::create`'s transaction.

use rust_decimal::Decimal;
use thiserror::Error;

use clothy_core::{OrderId, PaymentMethod, UserId, UtrNumber};

use crate::db::orders::{NewOrder, NewOrderItem};
use crate::db::{AddressRepository, OrderRepository};
use crate::models::address::AddressSnapshot;
use crate::models::order::{CheckoutItem, CheckoutRequest};
use crate::state::AppState;

/// Product name of the synthetic cash-on-delivery surcharge line.
pub const COD_CHARGE_NAME: &str = "Cash on Delivery Charge";

/// Fixed cash-on-delivery surcharge amount.
pub const COD_CHARGE_AMOUNT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// A checkout request that failed validation. Each variant's message is the
/// response body the caller sees.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Items are required")]
    NoItems,
    #[error("Valid total amount is required")]
    InvalidTotal,
    #[error("Payment method is required")]
    MissingPaymentMethod,
    #[error("UTR number is required for UPI payments")]
    MissingUtr,
    #[error("UTR number must be exactly 12 digits")]
    MalformedUtr,
}

/// A checkout request that has passed validation.
#[derive(Debug)]
pub struct ValidCheckout {
    pub items: Vec<CheckoutItem>,
    pub total_amount: Decimal,
    pub shipping_address_id: Option<clothy_core::AddressId>,
    pub payment_method: PaymentMethod,
    /// Present exactly when the method is UPI.
    pub utr_number: Option<UtrNumber>,
}

/// Validate a checkout request.
///
/// Checks run in a fixed order: items, total, payment method, then
/// UPI-specific UTR rules. The first failure wins.
///
/// # Errors
///
/// Returns the first `CheckoutError` encountered.
pub fn validate(request: CheckoutRequest) -> Result<ValidCheckout, CheckoutError> {
    if request.items.is_empty() {
        return Err(CheckoutError::NoItems);
    }

    let total_amount = match request.total_amount {
        Some(total) if total > Decimal::ZERO => total,
        _ => return Err(CheckoutError::InvalidTotal),
    };

    let Some(payment_method) = request.payment_method else {
        return Err(CheckoutError::MissingPaymentMethod);
    };

    // A UTR is recorded only for UPI; for every other method a supplied one
    // is ignored rather than rejected.
    let utr_number = if payment_method == PaymentMethod::Upi {
        let Some(raw) = request.utr_number.as_deref() else {
            return Err(CheckoutError::MissingUtr);
        };
        Some(UtrNumber::parse(raw).map_err(|_| CheckoutError::MalformedUtr)?)
    } else {
        None
    };

    Ok(ValidCheckout {
        items: request.items,
        total_amount,
        shipping_address_id: request.shipping_address_id,
        payment_method,
        utr_number,
    })
}

/// Map validated checkout items to order lines.
///
/// Names and prices are trusted from the caller. Cash-on-delivery orders get
/// one extra synthetic surcharge line appended after the submitted items.
#[must_use]
pub fn assemble_items(checkout: &ValidCheckout) -> Vec<NewOrderItem> {
    let mut items: Vec<NewOrderItem> = checkout
        .items
        .iter()
        .map(|item| NewOrderItem {
            product_name: item.name.clone(),
            unit_price: item.price,
            quantity: item.quantity,
        })
        .collect();

    if checkout.payment_method == PaymentMethod::Cod {
        items.push(NewOrderItem {
            product_name: COD_CHARGE_NAME.to_owned(),
            unit_price: COD_CHARGE_AMOUNT,
            quantity: 1,
        });
    }

    items
}

/// Place an order for the given owner.
///
/// Resolves the shipping address (owner-scoped: an id belonging to someone
/// else degrades to no snapshot, the same as an unknown id), assembles the
/// order, and persists it together with the cart clear in one transaction.
///
/// # Errors
///
/// Returns `AppError::Checkout` on validation failure (before any write) or
/// `AppError::Database` if persistence fails.
pub async fn place_order(
    state: &AppState,
    owner: UserId,
    request: CheckoutRequest,
) -> crate::error::Result<OrderId> {
    let checkout = validate(request)?;

    let shipping_address = match checkout.shipping_address_id {
        Some(address_id) => AddressRepository::new(state.pool())
            .find_for_owner(owner, address_id)
            .await?
            .as_ref()
            .map(AddressSnapshot::from),
        None => None,
    };

    let order = NewOrder {
        total_amount: checkout.total_amount,
        shipping_address,
        payment_method: checkout.payment_method.clone(),
        utr_number: checkout.utr_number.clone(),
        items: assemble_items(&checkout),
    };

    let order_id = OrderRepository::new(state.pool()).create(owner, &order).await?;

    tracing::info!(owner = %owner, order = %order_id, method = %order.payment_method, "order placed");

    Ok(order_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clothy_core::AddressId;

    fn item(name: &str, price: i64, quantity: i32) -> CheckoutItem {
        CheckoutItem {
            name: name.to_owned(),
            price: Decimal::from(price),
            quantity,
        }
    }

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            items: vec![item("Tee", 300, 2)],
            total_amount: Some(Decimal::from(600)),
            shipping_address_id: Some(AddressId::new(1)),
            payment_method: Some(PaymentMethod::Cod),
            utr_number: None,
        }
    }

    #[test]
    fn test_empty_items_rejected_first() {
        // Several fields are bad; the items check must win.
        let result = validate(CheckoutRequest {
            items: Vec::new(),
            total_amount: None,
            shipping_address_id: None,
            payment_method: None,
            utr_number: None,
        });
        assert_eq!(result.unwrap_err(), CheckoutError::NoItems);
    }

    #[test]
    fn test_total_must_be_positive() {
        let mut req = request();
        req.total_amount = Some(Decimal::ZERO);
        assert_eq!(validate(req).unwrap_err(), CheckoutError::InvalidTotal);

        let mut req = request();
        req.total_amount = Some(Decimal::from(-5));
        assert_eq!(validate(req).unwrap_err(), CheckoutError::InvalidTotal);

        let mut req = request();
        req.total_amount = None;
        assert_eq!(validate(req).unwrap_err(), CheckoutError::InvalidTotal);
    }

    #[test]
    fn test_payment_method_required() {
        let mut req = request();
        req.payment_method = None;
        assert_eq!(
            validate(req).unwrap_err(),
            CheckoutError::MissingPaymentMethod
        );
    }

    #[test]
    fn test_upi_requires_utr() {
        let mut req = request();
        req.payment_method = Some(PaymentMethod::Upi);
        req.utr_number = None;
        assert_eq!(validate(req).unwrap_err(), CheckoutError::MissingUtr);
    }

    #[test]
    fn test_upi_rejects_malformed_utr() {
        // Eleven digits plus a letter: right-looking but not 12 digits.
        let mut req = request();
        req.payment_method = Some(PaymentMethod::Upi);
        req.utr_number = Some("123456789AB".to_owned());
        assert_eq!(validate(req).unwrap_err(), CheckoutError::MalformedUtr);
    }

    #[test]
    fn test_upi_accepts_twelve_digit_utr() {
        let mut req = request();
        req.payment_method = Some(PaymentMethod::Upi);
        req.utr_number = Some("123456789012".to_owned());
        let valid = validate(req).expect("valid checkout");
        assert_eq!(
            valid.utr_number,
            Some(UtrNumber::parse("123456789012").expect("valid UTR"))
        );
    }

    #[test]
    fn test_utr_ignored_for_non_upi_methods() {
        let mut req = request();
        req.utr_number = Some("not-a-utr".to_owned());
        let valid = validate(req).expect("valid checkout");
        assert_eq!(valid.utr_number, None);
    }

    #[test]
    fn test_other_payment_methods_pass_through() {
        let mut req = request();
        req.payment_method = Some(PaymentMethod::Other("card".to_owned()));
        let valid = validate(req).expect("valid checkout");
        assert_eq!(valid.payment_method.as_str(), "card");
        assert_eq!(valid.utr_number, None);
    }

    #[test]
    fn test_cod_appends_exactly_one_surcharge_line() {
        let valid = validate(request()).expect("valid checkout");
        let items = assemble_items(&valid);

        assert_eq!(items.len(), 2);
        assert_eq!(
            items.first(),
            Some(&NewOrderItem {
                product_name: "Tee".to_owned(),
                unit_price: Decimal::from(300),
                quantity: 2,
            })
        );
        assert_eq!(
            items.last(),
            Some(&NewOrderItem {
                product_name: COD_CHARGE_NAME.to_owned(),
                unit_price: Decimal::from(10),
                quantity: 1,
            })
        );
    }

    #[test]
    fn test_upi_gets_no_surcharge_line() {
        let mut req = request();
        req.payment_method = Some(PaymentMethod::Upi);
        req.utr_number = Some("123456789012".to_owned());
        let valid = validate(req).expect("valid checkout");
        let items = assemble_items(&valid);

        assert_eq!(items.len(), 1);
        assert!(items.iter().all(|i| i.product_name != COD_CHARGE_NAME));
    }
}
