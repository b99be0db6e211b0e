//! # Cart State Machine
//!
//! The in-memory cart: an ordered sequence of [`CartLine`]s keyed by
//! product id.
//!
//! ## Per-line Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            add                                                          │
//! │  absent ─────────► present(q=1, selected)                               │
//! │    ▲                    │                                               │
//! │    │                    ├── add / increase ──► present(q+1, s)          │
//! │    │  remove            ├── decrease, q>1  ──► present(q-1, s)          │
//! │    └────────────────────┤── decrease, q=1  ──► present(1, s)  (no-op)   │
//! │                         └── toggle_select  ──► present(q, ¬s)           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id
//! - `quantity >= 1` for every line
//! - New lines start selected
//! - Lines keep add-time order
//!
//! Operations on an id that is not in the cart return `None` and leave the
//! cart untouched.

use serde::{Deserialize, Deserializer, Serialize};

use crate::money::Money;
use crate::types::{CartLine, ProductInput, QuantityChange};

/// What `add_item` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended with quantity 1.
    Inserted,
    /// An existing line's quantity was bumped.
    Incremented { quantity: u32 },
}

/// The shopping cart.
///
/// Serializes as a plain array of lines. Deserializing goes through
/// [`Cart::from_lines`], so a decoded cart always holds the invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Rebuilds a cart from previously persisted lines.
    ///
    /// A snapshot edited outside the app may violate the invariants, so the
    /// first line for each id wins and a zero quantity is lifted to 1.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Cart::new();
        for mut line in lines {
            if cart.position(&line.id).is_some() {
                continue;
            }
            line.quantity = line.quantity.max(1);
            cart.lines.push(line);
        }
        cart
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.id == id)
    }

    fn line_mut(&mut self, id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.id == id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of `product`.
    ///
    /// Existing line: quantity + 1, selection untouched.
    /// New line: appended with quantity 1, selected.
    pub fn add_item(&mut self, product: &ProductInput) -> AddOutcome {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return AddOutcome::Incremented {
                quantity: line.quantity,
            };
        }

        self.lines.push(CartLine::from_product(product));
        AddOutcome::Inserted
    }

    /// Removes the line for `id`, returning it.
    pub fn remove_item(&mut self, id: &str) -> Option<CartLine> {
        let index = self.position(id)?;
        Some(self.lines.remove(index))
    }

    /// Steps the quantity of `id` and returns the new quantity.
    ///
    /// `Decrease` on a line at 1 returns `Some(1)`: the line stays.
    pub fn set_quantity(&mut self, id: &str, change: QuantityChange) -> Option<u32> {
        let line = self.line_mut(id)?;
        match change {
            QuantityChange::Increase => line.quantity = line.quantity.saturating_add(1),
            QuantityChange::Decrease if line.quantity > 1 => line.quantity -= 1,
            QuantityChange::Decrease => {}
        }
        Some(line.quantity)
    }

    /// Flips `selected` on `id` and returns the new value.
    pub fn toggle_select(&mut self, id: &str) -> Option<bool> {
        let line = self.line_mut(id)?;
        line.selected = !line.selected;
        Some(line.selected)
    }

    /// Sets `selected = value` on every line.
    pub fn toggle_select_all(&mut self, value: bool) {
        for line in &mut self.lines {
            line.selected = value;
        }
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Takes the units of `ordered` out of the cart.
    ///
    /// Each matching line loses the ordered quantity; only lines that reach
    /// zero are removed. Units added after the order was drafted stay.
    /// Returns how many lines were removed.
    pub fn subtract_ordered(&mut self, ordered: &[CartLine]) -> usize {
        let before = self.lines.len();
        for placed in ordered {
            if let Some(line) = self.line_mut(&placed.id) {
                line.quantity = line.quantity.saturating_sub(placed.quantity);
            }
        }
        self.lines.retain(|l| l.quantity > 0);
        before - self.lines.len()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All lines in add-time order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Consumes the cart, yielding its lines.
    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    /// The line for `id`, if present.
    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines that count towards checkout.
    pub fn selected_lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter().filter(|l| l.selected)
    }

    /// Σ price × quantity over selected lines.
    pub fn selected_subtotal(&self) -> Money {
        self.selected_lines().map(CartLine::line_total).sum()
    }

    /// Number of selected lines.
    pub fn selected_count(&self) -> usize {
        self.selected_lines().count()
    }

    /// Units across all lines (the header badge).
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// True when any selected line needs a prescription.
    pub fn requires_prescription(&self) -> bool {
        self.selected_lines().any(|l| l.prescription_required)
    }

    /// True when every line is selected (and there is at least one).
    pub fn all_selected(&self) -> bool {
        !self.lines.is_empty() && self.lines.iter().all(|l| l.selected)
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Cart::from_lines(lines)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<CartLine>::deserialize(deserializer).map(Cart::from_lines)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> ProductInput {
        ProductInput::new(id, format!("Product {}", id), Money::from_minor(price))
    }

    #[test]
    fn test_add_inserts_then_increments() {
        let mut cart = Cart::new();
        let p = product("1", 100);

        assert_eq!(cart.add_item(&p), AddOutcome::Inserted);
        assert_eq!(cart.add_item(&p), AddOutcome::Incremented { quantity: 2 });

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.selected_subtotal(), Money::from_minor(200));
    }

    #[test]
    fn test_add_keeps_selection_of_existing_line() {
        let mut cart = Cart::new();
        let p = product("1", 100);
        cart.add_item(&p);
        cart.toggle_select("1");

        cart.add_item(&p);
        let line = cart.line("1").unwrap();
        assert_eq!(line.quantity, 2);
        assert!(!line.selected);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(&product("b", 1));
        cart.add_item(&product("a", 1));
        cart.add_item(&product("b", 1));

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 100));
        cart.add_item(&product("2", 100));

        assert!(cart.remove_item("1").is_some());
        let after_first = cart.clone();
        assert!(cart.remove_item("1").is_none());
        assert_eq!(cart, after_first);
    }

    #[test]
    fn test_decrease_stops_at_one() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 100));

        assert_eq!(cart.set_quantity("1", QuantityChange::Decrease), Some(1));
        assert_eq!(cart.set_quantity("1", QuantityChange::Increase), Some(2));
        assert_eq!(cart.set_quantity("1", QuantityChange::Decrease), Some(1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 100));
        let before = cart.clone();

        assert_eq!(cart.set_quantity("x", QuantityChange::Increase), None);
        assert_eq!(cart.toggle_select("x"), None);
        assert_eq!(cart.remove_item("x"), None);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_selection_drives_totals() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 100));
        cart.add_item(&product("2", 250));

        assert_eq!(cart.toggle_select("2"), Some(false));
        assert_eq!(cart.selected_count(), 1);
        assert_eq!(cart.selected_subtotal(), Money::from_minor(100));
        assert!(!cart.all_selected());

        cart.toggle_select_all(true);
        assert_eq!(cart.selected_count(), 2);
        assert!(cart.all_selected());

        cart.toggle_select_all(false);
        assert_eq!(cart.selected_subtotal(), Money::zero());
    }

    #[test]
    fn test_requires_prescription_only_counts_selected() {
        let mut cart = Cart::new();
        cart.add_item(&product("otc", 100));
        cart.add_item(&product("rx", 900).with_prescription_required(true));
        assert!(cart.requires_prescription());

        cart.toggle_select("rx");
        assert!(!cart.requires_prescription());
    }

    #[test]
    fn test_from_lines_repairs_snapshot() {
        let mut first = CartLine::from_product(&product("1", 100));
        first.quantity = 0;
        let duplicate = CartLine::from_product(&product("1", 999));
        let other = CartLine::from_product(&product("2", 50));

        let cart = Cart::from_lines(vec![first, duplicate, other]);
        assert_eq!(cart.len(), 2);
        let line = cart.line("1").unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.price, Money::from_minor(100));
    }

    #[test]
    fn test_subtract_ordered_removes_fully_ordered_lines() {
        let mut cart = Cart::new();
        for id in ["1", "2", "3"] {
            cart.add_item(&product(id, 10));
        }
        let ordered: Vec<CartLine> = cart
            .lines()
            .iter()
            .filter(|l| l.id != "2")
            .cloned()
            .collect();

        assert_eq!(cart.subtract_ordered(&ordered), 2);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].id, "2");
    }

    #[test]
    fn test_subtract_ordered_keeps_units_added_later() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 10));
        let ordered = cart.lines().to_vec();

        cart.add_item(&product("1", 10));
        cart.add_item(&product("1", 10));

        assert_eq!(cart.subtract_ordered(&ordered), 0);
        assert_eq!(cart.line("1").map(|l| l.quantity), Some(2));
    }

    #[test]
    fn test_subtract_ordered_ignores_lines_removed_meanwhile() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 10));
        cart.add_item(&product("2", 10));
        let ordered = cart.lines().to_vec();

        cart.remove_item("1");
        assert_eq!(cart.subtract_ordered(&ordered), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_deserialize_repairs_broken_snapshot() {
        let json = r#"[
            {"id":"1","name":"ORS","price":40,"quantity":0},
            {"id":"1","name":"ORS","price":40,"quantity":0},
            {"id":"2","name":"Zinc","price":90,"quantity":2}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        assert_eq!(cart.len(), 2);
        let quantities: Vec<u32> = cart.lines().iter().map(|l| l.quantity).collect();
        assert_eq!(quantities, vec![1, 2]);
    }

    #[test]
    fn test_total_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 10));
        cart.add_item(&product("1", 10));
        cart.add_item(&product("2", 10));
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 10));
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "1");
    }
}
