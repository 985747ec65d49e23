//! API-facing models
//!
//! 服务端与客户端共享的数据模型。数据库实体 (RecordId) 在 server 侧定义，
//! 通过 `From` 转换为这里的 DTO (String id)。

pub mod category;
pub mod kitchen_log;
pub mod menu_item;
pub mod order;

// Re-exports
pub use category::Category;
pub use kitchen_log::{KitchenAction, KitchenLogEntry};
pub use menu_item::MenuItem;
pub use order::{CustomerType, Order, OrderItem, OrderStatus, OrderType, PaymentMethod, PaymentStatus};
