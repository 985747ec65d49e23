//! Category Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
}

impl From<Category> for shared::models::Category {
    fn from(c: Category) -> Self {
        Self {
            id: c.id.map(|t| t.to_string()).unwrap_or_default(),
            name: c.name,
            description: c.description,
            image: c.image,
            sort_order: c.sort_order,
            is_active: c.is_active,
        }
    }
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub image: Option<String>,
    pub sort_order: Option<i32>,
}

/// Update category payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub image: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
