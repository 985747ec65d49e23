//! Cart / order-draft accumulator
//!
//! Holds an in-progress, unsubmitted order's line items for the dine-in
//! table flow. A [`Cart`] is a plain owned value; the per-session
//! [`CartStore`] is owned by the server state and passed by reference to the
//! handlers that need it — no ambient singleton.
//!
//! The admin walk-up flow never touches this module: it submits a complete
//! draft directly to the lifecycle controller.

pub mod store;

pub use store::CartStore;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of a menu item captured when it is first added to a cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItemInput {
    pub menu_item_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub image: Option<String>,
}

/// One cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    pub menu_item_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub image: Option<String>,
    pub quantity: u32,
}

/// In-progress order draft
///
/// Entries keep insertion order for display; the order carries no business
/// meaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a menu item. An entry with the same menu reference
    /// has its quantity incremented by 1; otherwise a new entry with
    /// quantity 1 is appended.
    pub fn add_item(&mut self, item: CartItemInput) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.menu_item_id == item.menu_item_id)
        {
            entry.quantity += 1;
        } else {
            self.entries.push(CartEntry {
                menu_item_id: item.menu_item_id,
                name: item.name,
                unit_price: item.unit_price,
                image: item.image,
                quantity: 1,
            });
        }
    }

    /// Remove the entry matching the menu reference; no-op if absent.
    pub fn remove_item(&mut self, menu_item_id: &str) {
        self.entries.retain(|e| e.menu_item_id != menu_item_id);
    }

    /// Set an entry's quantity to an absolute value. A quantity of zero or
    /// less removes the entry entirely.
    pub fn update_quantity(&mut self, menu_item_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(menu_item_id);
            return;
        }
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.menu_item_id == menu_item_id)
        {
            entry.quantity = quantity as u32;
        }
    }

    /// Empty the cart
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sum of unit_price × quantity over all entries
    pub fn total_amount(&self) -> Decimal {
        self.entries
            .iter()
            .map(|e| e.unit_price * Decimal::from(e.quantity))
            .sum()
    }

    /// Count of distinct entries — not the sum of quantities.
    pub fn total_item_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }
}
