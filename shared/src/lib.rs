//! Shared types for Tiffin
//!
//! Wire-facing models used by the server and its clients: the order and
//! kitchen-log enums with their exact wire strings, and the API DTOs for
//! orders, kitchen-log entries, menu items and categories.

pub mod models;

// Re-exports
pub use models::{
    Category, CustomerType, KitchenAction, KitchenLogEntry, MenuItem, Order, OrderItem,
    OrderStatus, OrderType, PaymentMethod, PaymentStatus,
};
pub use serde::{Deserialize, Serialize};
