//! # Validation Module
//!
//! Boundary checks for data entering the cart from the outside world.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog API response (deserialization)                       │
//! │  └── Field presence and types                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── validate_product()  before add_item                               │
//! │  └── validate_delivery() before building an order draft               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart state machine                                           │
//! │  └── uniqueness of ids, quantity ≥ 1                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rxcart_core::validation::{validate_product_name, validate_price};
//! use rxcart_core::Money;
//!
//! assert!(validate_product_name("Paracetamol 500mg").is_ok());
//! assert!(validate_price(Money::from_minor(-1)).is_err());
//! ```

use crate::checkout::DeliveryDetails;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ProductInput;
use crate::{MAX_PRODUCT_ID_LEN, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be blank
/// - At most 64 characters
/// - No whitespace or control characters
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::required("id"));
    }

    if id.len() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    if id.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must not contain whitespace or control characters".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Example
/// ```rust
/// use rxcart_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Vitamin C 1000mg").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free samples).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates everything `add_item` relies on.
pub fn validate_product(product: &ProductInput) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_product_name(&product.name)?;
    validate_price(product.price)?;
    Ok(())
}

// =============================================================================
// Delivery Validators
// =============================================================================

fn require_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Validates a contact phone number.
///
/// ## Rules
/// - Digits plus optional leading `+`, spaces and hyphens
/// - Between 7 and 15 digits (E.164 upper bound)
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();
    require_text("phone", phone)?;

    let body = phone.strip_prefix('+').unwrap_or(phone);
    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces and hyphens".to_string(),
        });
    }

    let digits = body.chars().filter(char::is_ascii_digit).count();
    if !(7..=15).contains(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must have between 7 and 15 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates the delivery block of a checkout.
pub fn validate_delivery(delivery: &DeliveryDetails) -> ValidationResult<()> {
    require_text("recipient", &delivery.recipient)?;
    validate_phone(&delivery.phone)?;
    require_text("address_line", &delivery.address_line)?;
    require_text("city", &delivery.city)?;
    require_text("postal_code", &delivery.postal_code)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
