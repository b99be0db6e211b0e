//! # Checkout
//!
//! Turns the selected cart lines into an order.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  checkout()                                                             │
//! │     │                                                                   │
//! │     ├─► prepare_order()        empty / nothing selected ──► error toast │
//! │     │        │                                                          │
//! │     │        ▼ OrderDraft (selected lines only)                         │
//! │     ├─► gateway.submit_order() rejected / unreachable ────► error toast │
//! │     │        │                                                          │
//! │     │        ▼ OrderReceipt                                             │
//! │     └─► remove_ordered()       unselected lines stay     ──► success    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store lock is never held while the gateway call is in flight.

use std::future::Future;

use rxcart_core::{DeliveryDetails, Notification, OrderDraft, OrderReceipt, PaymentMethod};
use tracing::{info, warn};

use crate::error::{GatewayError, StoreResult};
use crate::state::CartState;

/// The order API.
pub trait OrderGateway: Send + Sync {
    /// Submits `draft` and returns the id the API assigned.
    fn submit_order(
        &self,
        draft: &OrderDraft,
    ) -> impl Future<Output = Result<OrderReceipt, GatewayError>> + Send;
}

/// Places an order for the selected lines.
///
/// On success the ordered lines leave the cart. On any failure the cart is
/// untouched and the shopper gets an error toast.
pub async fn checkout<G: OrderGateway>(
    state: &CartState,
    gateway: &G,
    delivery: DeliveryDetails,
    payment: PaymentMethod,
) -> StoreResult<OrderReceipt> {
    let draft = state.with_store(|s| s.prepare_order(delivery, payment))?;

    info!(
        draft_id = %draft.draft_id,
        lines = draft.lines.len(),
        subtotal = %draft.subtotal,
        requires_prescription = draft.requires_prescription,
        "Submitting order"
    );

    match gateway.submit_order(&draft).await {
        Ok(receipt) => {
            state.with_store_mut(|s| {
                s.remove_ordered(&draft);
                s.notify(Notification::success(format!(
                    "Order {} placed",
                    receipt.order_id
                )));
            });
            info!(draft_id = %draft.draft_id, order_id = %receipt.order_id, "Order placed");
            Ok(receipt)
        }
        Err(e) => {
            warn!(draft_id = %draft.draft_id, error = %e, "Order submission failed");
            state.with_store(|s| {
                s.notify(Notification::error(format!("Could not place order: {}", e)))
            });
            Err(e.into())
        }
    }
}
