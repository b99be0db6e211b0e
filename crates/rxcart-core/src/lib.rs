//! # rxcart-core: Pure Cart Logic
//!
//! This crate holds the shopping cart of the pharmacy storefront as a pure
//! state machine. It has no storage, no channels and no network access; the
//! `rxcart-store` crate layers persistence and notifications on top.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        rxcart Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront SPA                               │   │
//! │  │    Product page ──► Cart page ──► Checkout ──► Order placed     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    rxcart-store                                 │   │
//! │  │    CartStore, storage backends, toasts, session events          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rxcart-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ checkout  │  │   │
//! │  │   │ CartLine  │  │   Money   │  │   Cart    │  │ OrderDraft│  │   │
//! │  │   │ Product   │  │           │  │ selection │  │ validate  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Cart lines, product input contract, notifications
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The cart state machine
//! - [`checkout`] - Checkout validation and order drafts
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation of product and delivery input
//!
//! ## Example Usage
//!
//! ```rust
//! use rxcart_core::{Cart, Money, ProductInput, QuantityChange};
//!
//! let mut cart = Cart::new();
//! let paracetamol = ProductInput::new("1", "Paracetamol 500mg", Money::from_minor(100));
//!
//! cart.add_item(&paracetamol);
//! cart.add_item(&paracetamol);
//! assert_eq!(cart.selected_subtotal(), Money::from_minor(200));
//!
//! // Decreasing never drops a line below one unit
//! cart.set_quantity("1", QuantityChange::Decrease);
//! cart.set_quantity("1", QuantityChange::Decrease);
//! assert_eq!(cart.line("1").map(|l| l.quantity), Some(1));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, Cart};
pub use checkout::{validate_checkout, DeliveryDetails, OrderDraft, OrderReceipt, PaymentMethod};
pub use error::{CheckoutError, CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart snapshot lives under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "cartItems";

/// Maximum length of a product identifier.
pub const MAX_PRODUCT_ID_LEN: usize = 64;

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
