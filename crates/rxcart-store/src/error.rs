//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  StorageError ──► logged at warn, swallowed (memory stays authoritative)│
//! │                                                                         │
//! │  ValidationError / CheckoutError (rxcart-core)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError::Core ──► caller; checkout also raises an error toast       │
//! │                                                                         │
//! │  GatewayError ──► StoreError::Gateway ──► caller + error toast          │
//! │                                                                         │
//! │  ConfigError ──► startup only                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rxcart_core::{CheckoutError, CoreError, ValidationError};
use thiserror::Error;

/// Key-value backend failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem error in a file-backed store.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key contains characters the backend cannot store safely.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Backend is disabled, full, or otherwise refusing writes.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Order API failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The API answered and refused the order.
    #[error("Order rejected: {reason}")]
    Rejected { reason: String },

    /// The API could not be reached.
    #[error("Order service unavailable: {0}")]
    Unavailable(String),
}

/// Everything a caller of the store can see.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(err.into())
    }
}

impl From<CheckoutError> for StoreError {
    fn from(err: CheckoutError) -> Self {
        StoreError::Core(err.into())
    }
}

impl StoreError {
    /// The checkout refusal, if that is what this is.
    pub fn as_checkout(&self) -> Option<&CheckoutError> {
        match self {
            StoreError::Core(CoreError::Checkout(e)) => Some(e),
            _ => None,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_error_roundtrips_through_store_error() {
        let err: StoreError = CheckoutError::EmptyCart.into();
        assert_eq!(err.as_checkout(), Some(&CheckoutError::EmptyCart));
        assert_eq!(err.to_string(), "Checkout error: Your cart is empty");
    }

    #[test]
    fn test_gateway_error_is_not_checkout() {
        let err: StoreError = GatewayError::Unavailable("timeout".to_string()).into();
        assert!(err.as_checkout().is_none());
        assert_eq!(err.to_string(), "Order service unavailable: timeout");
    }
}
