//! Order Repository
//!
//! Append-style creation plus in-place status/payment patches. All order
//! mutations go through the lifecycle controller; nothing here deletes an
//! order.

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::Order;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::models::{OrderStatus, PaymentMethod, PaymentStatus};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "orders";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let order: Option<Order> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(order)
    }

    /// List orders, newest first
    pub async fn find_all(&self, limit: i64, offset: i64) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders ORDER BY created_at DESC LIMIT $limit START $offset")
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// List orders in a given lifecycle status, newest first
    pub async fn find_by_status(
        &self,
        status: OrderStatus,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM orders WHERE status = $status ORDER BY created_at DESC LIMIT $limit START $offset",
            )
            .bind(("status", status))
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// List a customer's orders, newest first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let user_owned = user_id.to_string();
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE user_id = $user ORDER BY created_at DESC")
            .bind(("user", user_owned))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Patch the lifecycle status. No transition legality check: any status
    /// may follow any other, including back-transitions.
    pub async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> RepoResult<Order> {
        #[derive(Serialize)]
        struct StatusPatch {
            status: OrderStatus,
            updated_at: DateTime<Utc>,
        }

        self.merge_patch(id, StatusPatch { status, updated_at: now }).await
    }

    /// Patch the payment status and optionally the payment method.
    pub async fn update_payment(
        &self,
        id: &str,
        payment_status: PaymentStatus,
        payment_method: Option<PaymentMethod>,
        now: DateTime<Utc>,
    ) -> RepoResult<Order> {
        #[derive(Serialize)]
        struct PaymentPatch {
            payment_status: PaymentStatus,
            #[serde(skip_serializing_if = "Option::is_none")]
            payment_method: Option<PaymentMethod>,
            updated_at: DateTime<Utc>,
        }

        self.merge_patch(
            id,
            PaymentPatch {
                payment_status,
                payment_method,
                updated_at: now,
            },
        )
        .await
    }

    /// Merge a partial patch into an existing order and return the fresh
    /// record. Missing ids fail loudly with NotFound before the patch.
    async fn merge_patch<P: Serialize + Send + Sync + 'static>(
        &self,
        id: &str,
        patch: P,
    ) -> RepoResult<Order> {
        let pure_id = strip_table_prefix(TABLE, id);

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))?;

        let rec = RecordId::from_table_key(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $rec MERGE $data")
            .bind(("rec", rec))
            .bind(("data", patch))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
