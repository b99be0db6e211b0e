//! # Cart Store
//!
//! The single source of truth for the shopper's in-progress order. Wraps
//! the pure [`Cart`] with persistence and toasts.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action            Store Method           Persist   Toast            │
//! │  ─────────            ────────────           ───────   ─────            │
//! │  App start ─────────► open()                 read      -                │
//! │  Add to cart ───────► add_item()             write     success          │
//! │  Remove ────────────► remove_item()          write     info             │
//! │  +/- stepper ───────► set_quantity()         write     -                │
//! │  Checkbox ──────────► toggle_select()        write     -                │
//! │  Select all ────────► toggle_select_all()    write     -                │
//! │  Logout / clear ────► clear()                delete    -                │
//! │                                                                         │
//! │  "write" with an empty cart deletes the key instead.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures never reach the caller: reads fall back to an empty
//! cart, writes are logged and dropped, and the in-memory cart stays
//! authoritative for the rest of the session.

use std::fmt;
use std::sync::Arc;

use rxcart_core::validation::validate_product;
use rxcart_core::{
    AddOutcome, Cart, CartLine, CoreError, CoreResult, DeliveryDetails, Money, Notification,
    OrderDraft, PaymentMethod, ProductInput, QuantityChange,
};
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::events::SessionEvent;
use crate::notify::Notifier;
use crate::storage::KeyValueStorage;

/// Cart plus its persistence and notification plumbing.
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn KeyValueStorage>,
    notifier: Arc<dyn Notifier>,
    key: String,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("lines", &self.cart.len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Opens the store, restoring whatever snapshot `storage` holds at `key`.
    ///
    /// Never fails: a missing, unreadable or malformed snapshot yields an
    /// empty cart.
    pub fn open(
        storage: Arc<dyn KeyValueStorage>,
        notifier: Arc<dyn Notifier>,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let cart = load_cart(storage.as_ref(), &key);
        CartStore {
            cart,
            storage,
            notifier,
            key,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of `product`, inserting a line if needed.
    ///
    /// Invalid input is rejected before anything changes.
    pub fn add_item(&mut self, product: &ProductInput) -> CoreResult<AddOutcome> {
        validate_product(product)?;

        let outcome = self.cart.add_item(product);
        debug!(id = %product.id, ?outcome, "Cart add");
        self.persist();
        self.notify(Notification::success(format!(
            "{} added to cart",
            product.name.trim()
        )));

        Ok(outcome)
    }

    /// Removes the line for `id`. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: &str) -> Option<CartLine> {
        let removed = self.cart.remove_item(id)?;
        debug!(id, "Cart remove");
        self.persist();
        self.notify(Notification::info(format!(
            "{} removed from cart",
            removed.name.trim()
        )));
        Some(removed)
    }

    /// Steps a line's quantity; returns the new quantity.
    pub fn set_quantity(&mut self, id: &str, change: QuantityChange) -> Option<u32> {
        let quantity = self.cart.set_quantity(id, change)?;
        debug!(id, ?change, quantity, "Cart quantity");
        self.persist();
        Some(quantity)
    }

    /// Flips a line's selection; returns the new value.
    pub fn toggle_select(&mut self, id: &str) -> Option<bool> {
        let selected = self.cart.toggle_select(id)?;
        debug!(id, selected, "Cart select");
        self.persist();
        Some(selected)
    }

    /// Selects or deselects every line.
    pub fn toggle_select_all(&mut self, value: bool) {
        self.cart.toggle_select_all(value);
        debug!(value, lines = self.cart.len(), "Cart select all");
        self.persist();
    }

    /// Empties the cart and deletes the snapshot. No toast.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
        info!(key = %self.key, "Cart cleared");
    }

    /// Reacts to a session lifecycle signal.
    pub fn handle_session_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Logout => {
                debug!("Logout received, clearing cart");
                self.clear();
            }
            SessionEvent::Login { user_id } => {
                debug!(%user_id, "Login received, cart unchanged");
            }
        }
    }

    // =========================================================================
    // Checkout Support
    // =========================================================================

    /// Snapshots the selected lines for the order API.
    ///
    /// A refusal raises an error toast before it is returned, so the shopper
    /// sees why nothing was submitted.
    pub fn prepare_order(
        &self,
        delivery: DeliveryDetails,
        payment: PaymentMethod,
    ) -> CoreResult<OrderDraft> {
        OrderDraft::from_cart(&self.cart, delivery, payment).map_err(|err| {
            warn!(error = %err, "Checkout refused");
            self.notify(Notification::error(err.to_string()));
            CoreError::Checkout(err)
        })
    }

    /// Takes the units that went out with `draft` out of the cart; returns
    /// how many lines were emptied and removed.
    ///
    /// Units added while the order was in flight stay in the cart.
    pub fn remove_ordered(&mut self, draft: &OrderDraft) -> usize {
        let removed = self.cart.subtract_ordered(&draft.lines);
        self.persist();
        info!(draft_id = %draft.draft_id, removed, "Ordered lines removed from cart");
        removed
    }

    /// Raises a toast through the configured notifier.
    pub fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Owned copy of every line, in order.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.cart.lines().to_vec()
    }

    pub fn selected_subtotal(&self) -> Money {
        self.cart.selected_subtotal()
    }

    pub fn selected_count(&self) -> usize {
        self.cart.selected_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// The storage key this store writes to.
    pub fn key(&self) -> &str {
        &self.key
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Writes the whole cart, or deletes the key when empty. Failures are
    /// logged and dropped.
    fn persist(&self) {
        let result = if self.cart.is_empty() {
            self.storage.remove(&self.key)
        } else {
            serde_json::to_string(self.cart.lines())
                .map_err(StorageError::from)
                .and_then(|json| self.storage.set(&self.key, &json))
        };

        if let Err(e) = result {
            warn!(key = %self.key, error = %e, "Failed to persist cart, keeping in-memory state");
        }
    }
}

/// Reads the snapshot at `key`, falling back to an empty cart.
fn load_cart(storage: &dyn KeyValueStorage, key: &str) -> Cart {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No persisted cart, starting empty");
            return Cart::new();
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read persisted cart, starting empty");
            return Cart::new();
        }
    };

    match serde_json::from_str::<Vec<CartLine>>(&raw) {
        Ok(lines) => {
            let cart = Cart::from_lines(lines);
            info!(key, lines = cart.len(), "Cart restored");
            cart
        }
        Err(e) => {
            warn!(key, error = %e, "Persisted cart is malformed, starting empty");
            Cart::new()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
