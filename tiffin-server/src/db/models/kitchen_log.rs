//! Kitchen Log Model
//!
//! Append-only audit entries, one per staff-attributed order mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::KitchenAction;
use surrealdb::RecordId;

/// Kitchen log entry entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenLog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Record link to the owning order
    pub order_id: RecordId,
    pub staff_name: String,
    pub action: KitchenAction,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<KitchenLog> for shared::models::KitchenLogEntry {
    fn from(e: KitchenLog) -> Self {
        Self {
            id: e.id.map(|t| t.to_string()).unwrap_or_default(),
            order_id: e.order_id.to_string(),
            staff_name: e.staff_name,
            action: e.action,
            note: e.note,
            created_at: e.created_at,
        }
    }
}
