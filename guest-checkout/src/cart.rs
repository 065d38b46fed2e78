//! In-memory cart store
//!
//! Session-scoped mutable state holding the guest's selected items. The store
//! is an explicit, dependency-injected container rather than a process-wide
//! global, so concurrent guest sessions never share a cart.

use shared::models::{CartLine, MenuItemInfo};
use shared::money::{to_decimal, to_f64};

/// Ordered collection of cart lines.
///
/// Line order is insertion order and is preserved across mutations: a first
/// add appends, every later mutation keeps the line's position. Totals are
/// derived on every read, never cached.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item` to the cart. Never fails.
    ///
    /// If the item is already present its quantity is incremented in place;
    /// otherwise a new line with quantity 1 is appended.
    pub fn add_line(&mut self, item: &MenuItemInfo) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
            image_ref: item.image_ref.clone(),
        });
    }

    /// Overwrite a line's quantity in place (position unchanged).
    ///
    /// A quantity of zero or less removes the line; quantity-0 lines are
    /// never stored. No-op if the item is not in the cart.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove_line(item_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity = quantity;
        }
    }

    /// Drop a line; no-op if absent
    pub fn remove_line(&mut self, item_id: &str) {
        self.lines.retain(|l| l.item_id != item_id);
    }

    /// Empty the cart
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of unit_price * quantity over all lines, with decimal precision
    pub fn subtotal(&self) -> f64 {
        let sum = self
            .lines
            .iter()
            .map(|l| to_decimal(l.unit_price) * rust_decimal::Decimal::from(l.quantity))
            .sum();
        to_f64(sum)
    }

    /// Total number of units across all lines
    pub fn item_count(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}
