//! Database entity models
//!
//! Entities carry SurrealDB record ids; API handlers convert them into the
//! string-id DTOs from the `shared` crate via `From`.

pub mod category;
pub mod kitchen_log;
pub mod menu_item;
pub mod order;

// Re-exports
pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use kitchen_log::KitchenLog;
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{Order, OrderDraft, OrderDraftItem};
