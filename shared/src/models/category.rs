//! Category Model

use serde::{Deserialize, Serialize};

/// Menu category (API view, string id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    /// Unique display name
    pub name: String,
    pub description: Option<String>,
    /// Image URL for the customer menu page
    pub image: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
