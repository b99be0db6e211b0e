//! # Domain Types
//!
//! Data carried through the cart subsystem.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   add_item    ┌─────────────────────┐             │
//! │  │  ProductInput   │ ────────────► │      CartLine       │             │
//! │  │  ─────────────  │               │  ─────────────────  │             │
//! │  │  id, name       │               │  id, name, price    │             │
//! │  │  price          │               │  image              │             │
//! │  │  image?         │               │  quantity (≥ 1)     │             │
//! │  │  prescription?  │               │  selected           │             │
//! │  └─────────────────┘               │  prescriptionReq.   │             │
//! │                                    └─────────────────────┘             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ QuantityChange  │   │  Notification   │                             │
//! │  │  Increase       │   │  message        │                             │
//! │  │  Decrease       │   │  severity       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Shape
//! `CartLine` serializes with camelCase keys because the same JSON array is
//! read by the storefront:
//! ```json
//! [{"id":"1","name":"Paracetamol","price":100,"quantity":2,
//!   "selected":true,"prescriptionRequired":false}]
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Accepts a product id written as a string or as a bare integer.
///
/// Catalog records and snapshots written by the storefront may carry
/// numeric ids (`"id": 7`); they are kept as their decimal text.
fn id_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Unsigned(id) => id.to_string(),
        RawId::Signed(id) => id.to_string(),
    })
}

// =============================================================================
// Product Input
// =============================================================================

/// The record a product page hands to the cart.
///
/// Required: `id`, `name`, `price`. Everything else is optional and
/// defaults to "absent" / `false`. Validate with
/// [`validation::validate_product`](crate::validation::validate_product)
/// before trusting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductInput {
    #[serde(deserialize_with = "id_from_text_or_number")]
    pub id: String,
    pub name: String,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub prescription_required: bool,
}

impl ProductInput {
    /// Creates an input with the required fields only.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        ProductInput {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
            prescription_required: false,
        }
    }

    /// Sets the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Marks the product as prescription-only.
    pub fn with_prescription_required(mut self, required: bool) -> Self {
        self.prescription_required = required;
        self
    }
}

// =============================================================================
// Cart Line
// =============================================================================

fn default_selected() -> bool {
    true
}

/// One product in the cart.
///
/// Name, price, image and prescription flag are frozen when the line is
/// created; later adds of the same id only bump `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Product id, unique within the cart.
    #[serde(deserialize_with = "id_from_text_or_number")]
    pub id: String,

    /// Display name at time of adding.
    pub name: String,

    /// Unit price at time of adding.
    pub price: Money,

    /// Image reference, if the catalog supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Units in the cart, never below 1.
    pub quantity: u32,

    /// Whether the line counts towards the checkout subtotal.
    ///
    /// Older snapshots may lack the field; those lines load as selected.
    #[serde(default = "default_selected")]
    pub selected: bool,

    /// Copied from the product at add-time.
    #[serde(default)]
    pub prescription_required: bool,
}

impl CartLine {
    /// Builds a fresh line (quantity 1, selected) from a product.
    pub fn from_product(product: &ProductInput) -> Self {
        CartLine {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
            selected: true,
            prescription_required: product.prescription_required,
        }
    }

    /// `price × quantity`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

// =============================================================================
// Quantity Change
// =============================================================================

/// Direction of a quantity stepper click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuantityChange {
    /// +1, unconditionally.
    Increase,
    /// -1, but never below 1.
    Decrease,
}

// =============================================================================
// Notifications
// =============================================================================

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// A toast shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Notification {
            message: message.into(),
            severity,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notification::new(Severity::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notification::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notification::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification::new(Severity::Error, message)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
