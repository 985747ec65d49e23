//! Per-session cart store
//!
//! 以桌台会话为键的购物车存储。单会话内的变更按调用顺序串行生效；
//! 不同会话互不可见。

use super::{Cart, CartItemInput};
use dashmap::DashMap;

/// Concurrent map of table-session key → cart
#[derive(Debug, Default)]
pub struct CartStore {
    carts: DashMap<String, Cart>,
}

impl CartStore {
    pub fn new() -> Self {
        Self {
            carts: DashMap::new(),
        }
    }

    /// Add one unit of a menu item to a session's cart
    pub fn add_item(&self, session: &str, item: CartItemInput) -> Cart {
        let mut cart = self.carts.entry(session.to_string()).or_default();
        cart.add_item(item);
        cart.value().clone()
    }

    /// Set an entry's quantity (zero or less removes it)
    pub fn update_quantity(&self, session: &str, menu_item_id: &str, quantity: i64) -> Cart {
        let mut cart = self.carts.entry(session.to_string()).or_default();
        cart.update_quantity(menu_item_id, quantity);
        cart.value().clone()
    }

    /// Remove an entry; no-op if absent
    pub fn remove_item(&self, session: &str, menu_item_id: &str) -> Cart {
        let mut cart = self.carts.entry(session.to_string()).or_default();
        cart.remove_item(menu_item_id);
        cart.value().clone()
    }

    /// Current cart for a session (empty if never touched)
    pub fn get(&self, session: &str) -> Cart {
        self.carts
            .get(session)
            .map(|c| c.value().clone())
            .unwrap_or_default()
    }

    /// Drop a session's cart entirely
    pub fn clear(&self, session: &str) {
        self.carts.remove(session);
    }

    /// Remove and return a session's cart (checkout)
    pub fn take(&self, session: &str) -> Option<Cart> {
        self.carts.remove(session).map(|(_, cart)| cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn chai() -> CartItemInput {
        CartItemInput {
            menu_item_id: "menu_item:chai".to_string(),
            name: "Chai".to_string(),
            unit_price: Decimal::from(20),
            image: None,
        }
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = CartStore::new();
        store.add_item("table-1", chai());
        store.add_item("table-1", chai());
        store.add_item("table-2", chai());

        assert_eq!(store.get("table-1").entries()[0].quantity, 2);
        assert_eq!(store.get("table-2").entries()[0].quantity, 1);
        assert!(store.get("table-3").is_empty());
    }

    #[test]
    fn test_take_drains_the_session() {
        let store = CartStore::new();
        store.add_item("table-1", chai());

        let cart = store.take("table-1").unwrap();
        assert_eq!(cart.total_item_count(), 1);
        assert!(store.get("table-1").is_empty());
        assert!(store.take("table-1").is_none());
    }
}
