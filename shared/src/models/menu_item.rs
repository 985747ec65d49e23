//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu item (API view, string ids)
///
/// `name` 与 `price` 在下单时被快照进订单条目，之后菜单的修改不影响历史订单。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    /// Image URL for the customer menu page
    pub image: Option<String>,
    /// Owning category reference
    pub category_id: String,
    #[serde(default)]
    pub is_veg: bool,
    /// Unavailable items stay on the menu but cannot be ordered
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub sort_order: i32,
}

fn default_true() -> bool {
    true
}
