//! # rxcart-store: Cart Store for the Storefront
//!
//! Wraps the pure cart from `rxcart-core` with persistence, toasts,
//! session handling and checkout.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         rxcart-store                                    │
//! │                                                                         │
//! │  ┌──────────────┐    ┌──────────────┐    ┌──────────────┐              │
//! │  │  CartState   │───►│  CartStore   │───►│ KeyValue     │              │
//! │  │ (shared)     │    │ (cart + I/O) │    │ Storage      │              │
//! │  └──────┬───────┘    └──────┬───────┘    │ memory/file  │              │
//! │         │                   │            └──────────────┘              │
//! │         │ listen()          │ notify()                                 │
//! │  ┌──────▼───────┐    ┌──────▼───────┐    ┌──────────────┐              │
//! │  │SessionEvents │    │  Notifier    │    │ OrderGateway │◄── checkout()│
//! │  │ login/logout │    │ ToastChannel │    │ (order API)  │              │
//! │  └──────────────┘    └──────────────┘    └──────────────┘              │
//! │                                                                         │
//! │  CartConfig (TOML + env) builds storage and notifier at startup        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup
//! ```rust,no_run
//! use rxcart_store::{init_tracing, CartConfig, CartState, SessionEvents};
//!
//! # async fn start() -> Result<(), rxcart_store::StoreError> {
//! init_tracing();
//! let config = CartConfig::load_or_default(None);
//! let (notifier, _toasts) = config.build_notifier();
//! let state = CartState::from_config(&config, notifier)?;
//!
//! let events = SessionEvents::new();
//! let _listener = state.listen(&events);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod error;
pub mod events;
pub mod notify;
pub mod state;
pub mod storage;
pub mod store;
pub mod telemetry;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{checkout, OrderGateway};
pub use config::{CartConfig, NotificationSettings, StorageBackend, StorageSettings};
pub use error::{
    ConfigError, ConfigResult, GatewayError, StorageError, StorageResult, StoreError, StoreResult,
};
pub use events::{SessionEvent, SessionEvents};
pub use notify::{Notifier, SilentNotifier, ToastChannel};
pub use state::CartState;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::CartStore;
pub use telemetry::init_tracing;
