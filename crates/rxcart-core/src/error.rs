//! # Error Types
//!
//! Domain-specific error types for rxcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rxcart-core errors (this file)                                        │
//! │  ├── ValidationError  - Bad product / delivery input at the boundary   │
//! │  ├── CheckoutError    - Cart not ready for order submission            │
//! │  └── CoreError        - Umbrella for the above                         │
//! │                                                                         │
//! │  rxcart-store errors (separate crate)                                  │
//! │  ├── StorageError     - Key-value backend failures (swallowed)         │
//! │  ├── GatewayError     - Order API failures                             │
//! │  └── StoreError       - What callers of the store see                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations on an unknown line id are NOT errors: the cart treats them as
//! no-ops, so there is no "not found" variant on the mutation paths.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors surfaced by cart and checkout logic.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input rejected at the boundary.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Cart is not in a state that can be checked out.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A monetary amount was negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. control characters in an id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Reasons a checkout is refused before reaching the order API.
///
/// These are the only user-visible errors of the cart subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// No lines at all.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Lines exist but every one is deselected.
    #[error("Select at least one item to check out")]
    NothingSelected,

    /// Delivery details failed validation.
    #[error("Invalid delivery details: {0}")]
    InvalidDelivery(ValidationError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
