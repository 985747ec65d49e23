//! Kitchen Log Repository
//!
//! Append-only: entries are never updated or deleted.

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::KitchenLog;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "kitchen_log";

#[derive(Clone)]
pub struct KitchenLogRepository {
    base: BaseRepository,
}

impl KitchenLogRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append a log entry
    pub async fn append(&self, entry: KitchenLog) -> RepoResult<KitchenLog> {
        let created: Option<KitchenLog> = self.base.db().create(TABLE).content(entry).await?;
        created.ok_or_else(|| RepoError::Database("Failed to append kitchen log entry".to_string()))
    }

    /// List entries for an order in append order
    pub async fn find_by_order(&self, order_id: &str) -> RepoResult<Vec<KitchenLog>> {
        let pure_id = strip_table_prefix("orders", order_id);
        let rec = RecordId::from_table_key("orders", pure_id);
        let entries: Vec<KitchenLog> = self
            .base
            .db()
            .query("SELECT * FROM kitchen_log WHERE order_id = $order ORDER BY created_at")
            .bind(("order", rec))
            .await?
            .take(0)?;
        Ok(entries)
    }
}
