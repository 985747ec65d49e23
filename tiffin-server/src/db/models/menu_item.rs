//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image: Option<String>,
    /// Record link to the owning category
    pub category: RecordId,
    pub is_veg: bool,
    pub is_available: bool,
    pub sort_order: i32,
}

impl From<MenuItem> for shared::models::MenuItem {
    fn from(m: MenuItem) -> Self {
        Self {
            id: m.id.map(|t| t.to_string()).unwrap_or_default(),
            name: m.name,
            description: m.description,
            price: m.price,
            image: m.image,
            category_id: m.category.to_string(),
            is_veg: m.is_veg,
            is_available: m.is_available,
            sort_order: m.sort_order,
        }
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub price: Decimal,
    pub image: Option<String>,
    /// Owning category id ("category:xxx" or bare id)
    pub category_id: String,
    pub is_veg: Option<bool>,
    pub is_available: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub category_id: Option<String>,
    pub is_veg: Option<bool>,
    pub is_available: Option<bool>,
    pub sort_order: Option<i32>,
}
