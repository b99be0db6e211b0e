//! # Cart State
//!
//! Shared handle to the one [`CartStore`] of the application.
//!
//! The store is created once at startup and handed to every screen that
//! needs it. It is wrapped in `Arc<Mutex<_>>` only so the session listener
//! task can reach it; all UI calls are short and synchronous.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Product page ──┐                                                      │
//! │   Cart page ─────┼──► CartState ──► Mutex<CartStore> ──► storage        │
//! │   Checkout ──────┘         ▲                                            │
//! │                            │ listen()                                   │
//! │   Auth ── SessionEvents ───┘  (Logout ⇒ clear)                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::CartConfig;
use crate::error::StoreResult;
use crate::events::SessionEvents;
use crate::notify::Notifier;
use crate::store::CartStore;

/// Cloneable handle to the application's cart store.
#[derive(Debug, Clone)]
pub struct CartState {
    store: Arc<Mutex<CartStore>>,
}

impl CartState {
    pub fn new(store: CartStore) -> Self {
        CartState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Opens the store described by `config`.
    pub fn from_config(config: &CartConfig, notifier: Arc<dyn Notifier>) -> StoreResult<Self> {
        let storage = config.build_storage()?;
        let store = CartStore::open(storage, notifier, config.storage.cart_key.clone());
        Ok(CartState::new(store))
    }

    /// Runs `f` with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let subtotal = cart_state.with_store(|s| s.selected_subtotal());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        // A panic mid-mutation cannot leave a line half-written, so a
        // poisoned lock is still safe to use.
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Runs `f` with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_store_mut(|s| s.add_item(&product))?;
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }

    /// Applies every [`SessionEvent`](crate::events::SessionEvent) published
    /// on `events` to the store until the channel closes.
    ///
    /// If the listener falls behind and events are dropped, the cart is
    /// cleared: one of the dropped events may have been a logout. The cost
    /// is that a burst of `Login` events larger than the channel capacity
    /// also empties the cart. Size the channel with
    /// [`SessionEvents::with_capacity`] if publishers can burst; the default
    /// is [`DEFAULT_SESSION_CAPACITY`](crate::events::DEFAULT_SESSION_CAPACITY).
    pub fn listen(&self, events: &SessionEvents) -> JoinHandle<()> {
        let mut receiver = events.subscribe();
        let state = self.clone();

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => state.with_store_mut(|s| s.handle_session_event(&event)),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Session listener lagged, clearing cart");
                        state.with_store_mut(CartStore::clear);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            debug!("Session listener stopped");
        })
    }
}
