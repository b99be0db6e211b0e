//! # Checkout
//!
//! Turns the selected part of a cart into an immutable [`OrderDraft`] for
//! the order API.
//!
//! ## Flow
//! ```text
//! Cart ──► validate_checkout() ──► validate_delivery() ──► OrderDraft
//!              │                        │
//!              ├── EmptyCart            └── InvalidDelivery
//!              └── NothingSelected
//! ```
//!
//! Only selected lines are copied into the draft; deselected lines stay in
//! the cart for a later order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::CheckoutError;
use crate::money::Money;
use crate::types::CartLine;
use crate::validation::validate_delivery;

/// Where the order goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub recipient: String,
    pub phone: String,
    pub address_line: String,
    pub city: String,
    pub postal_code: String,
}

/// How the shopper pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Paid to the rider on delivery.
    #[default]
    CashOnDelivery,
    /// Paid through the payment gateway before dispatch.
    Online,
}

/// Refuses carts that cannot be checked out.
///
/// ## Example
/// ```rust
/// use rxcart_core::{validate_checkout, Cart, CheckoutError};
///
/// assert_eq!(validate_checkout(&Cart::new()), Err(CheckoutError::EmptyCart));
/// ```
pub fn validate_checkout(cart: &Cart) -> Result<(), CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if cart.selected_count() == 0 {
        return Err(CheckoutError::NothingSelected);
    }
    Ok(())
}

/// Snapshot of an order about to be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Client-generated id, doubles as an idempotency key.
    pub draft_id: Uuid,
    /// Selected lines at the time of checkout.
    pub lines: Vec<CartLine>,
    pub subtotal: Money,
    /// Units across `lines`.
    pub item_count: u64,
    /// The pharmacist must see a prescription before dispatch.
    pub requires_prescription: bool,
    pub delivery: DeliveryDetails,
    pub payment: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

impl OrderDraft {
    /// Validates `cart` and `delivery` and snapshots the selected lines.
    pub fn from_cart(
        cart: &Cart,
        delivery: DeliveryDetails,
        payment: PaymentMethod,
    ) -> Result<Self, CheckoutError> {
        validate_checkout(cart)?;
        validate_delivery(&delivery).map_err(CheckoutError::InvalidDelivery)?;

        let lines: Vec<CartLine> = cart.selected_lines().cloned().collect();
        let item_count = lines.iter().map(|l| u64::from(l.quantity)).sum();

        Ok(OrderDraft {
            draft_id: Uuid::new_v4(),
            subtotal: cart.selected_subtotal(),
            item_count,
            requires_prescription: cart.requires_prescription(),
            lines,
            delivery,
            payment,
            created_at: Utc::now(),
        })
    }

    /// Ids of the lines in this draft.
    pub fn line_ids(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.id.as_str())
    }
}

/// What the order API hands back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductInput;
    use crate::ValidationError;

    fn delivery() -> DeliveryDetails {
        DeliveryDetails {
            recipient: "Nadia".to_string(),
            phone: "01711000000".to_string(),
            address_line: "12 Lake Road".to_string(),
            city: "Chattogram".to_string(),
            postal_code: "4000".to_string(),
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        let otc = ProductInput::new("otc", "Saline", Money::from_minor(50));
        cart.add_item(&otc);
        cart.add_item(&otc);
        cart.add_item(
            &ProductInput::new("rx", "Azithromycin", Money::from_minor(400))
                .with_prescription_required(true),
        );
        cart
    }

    #[test]
    fn test_validate_checkout() {
        assert_eq!(validate_checkout(&Cart::new()), Err(CheckoutError::EmptyCart));

        let mut c = cart();
        assert_eq!(validate_checkout(&c), Ok(()));

        c.toggle_select_all(false);
        assert_eq!(validate_checkout(&c), Err(CheckoutError::NothingSelected));
    }

    #[test]
    fn test_draft_contains_selected_lines_only() {
        let mut c = cart();
        c.toggle_select("rx");

        let draft = OrderDraft::from_cart(&c, delivery(), PaymentMethod::Online).unwrap();
        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.subtotal, Money::from_minor(100));
        assert_eq!(draft.item_count, 2);
        assert!(!draft.requires_prescription);
        assert_eq!(draft.line_ids().collect::<Vec<_>>(), vec!["otc"]);
    }

    #[test]
    fn test_draft_flags_prescription() {
        let draft =
            OrderDraft::from_cart(&cart(), delivery(), PaymentMethod::CashOnDelivery).unwrap();
        assert!(draft.requires_prescription);
        assert_eq!(draft.subtotal, Money::from_minor(500));
    }

    #[test]
    fn test_draft_rejects_bad_delivery() {
        let mut d = delivery();
        d.recipient = String::new();
        let err = OrderDraft::from_cart(&cart(), d, PaymentMethod::Online).unwrap_err();
        assert_eq!(
            err,
            CheckoutError::InvalidDelivery(ValidationError::Required {
                field: "recipient".to_string()
            })
        );
    }

    #[test]
    fn test_payment_method_serialization() {
        let json = serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap();
        assert_eq!(json, "\"cash_on_delivery\"");
    }
}
