//! OrderLifecycle - order creation and status/payment transitions
//!
//! The single mutation path for orders. Creation snapshots menu names and
//! prices, forces the initial status and writes the first kitchen-log entry;
//! the two update operations patch one axis each and append a log entry when
//! a staff name is supplied.
//!
//! # Flow
//!
//! ```text
//! create_order(draft)
//!     ├─ 1. Validate draft (items present, quantities >= 1)
//!     ├─ 2. Resolve menu references, snapshot name/price
//!     ├─ 3. Check submitted total against snapshot sum
//!     ├─ 4. Persist order (status forced to order-received)
//!     └─ 5. Append "received" log entry (fire-and-forget)
//!
//! update_status(id, status, staff?, note?)
//!     ├─ 1. Patch status + updated_at (no legality check)
//!     └─ 2. staff present → append mapped log entry (fire-and-forget)
//! ```
//!
//! Order creation and the log append are two independent writes; a crash
//! between them leaves an order without its creation entry. Accepted gap.

use super::error::{OrderError, OrderResult};
use crate::db::models::{KitchenLog, Order, OrderDraft};
use crate::db::repository::{KitchenLogRepository, MenuItemRepository, OrderRepository};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use shared::models::{
    KitchenAction, OrderItem, OrderStatus, PaymentMethod, PaymentStatus,
    kitchen_log::SYSTEM_STAFF_NAME,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Fixed offset between creation and the estimated ready time
pub const ESTIMATED_READY_MINUTES: i64 = 30;

/// Order lifecycle controller
///
/// Constructor-injected over the database handle; owned by the server state
/// and handed to whichever handler needs it.
#[derive(Clone)]
pub struct OrderLifecycle {
    orders: OrderRepository,
    logs: KitchenLogRepository,
    menu: MenuItemRepository,
}

impl OrderLifecycle {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            logs: KitchenLogRepository::new(db.clone()),
            menu: MenuItemRepository::new(db),
        }
    }

    /// Create an order from a draft.
    ///
    /// Name and unit price of every line item are snapshotted from the menu
    /// store here and never re-read. The initial status is always
    /// `order-received`; the draft cannot carry a status. Exactly one
    /// kitchen-log entry (`received`, note "Order created") is appended,
    /// attributed to the supplied staff name or "System".
    pub async fn create_order(&self, draft: OrderDraft) -> OrderResult<Order> {
        if draft.customer_name.trim().is_empty() {
            return Err(OrderError::Validation(
                "customer_name must not be empty".to_string(),
            ));
        }
        if draft.items.is_empty() {
            return Err(OrderError::Validation(
                "Order must contain at least one item".to_string(),
            ));
        }

        let mut items = Vec::with_capacity(draft.items.len());
        for line in &draft.items {
            if line.quantity < 1 {
                return Err(OrderError::Validation(format!(
                    "Quantity for {} must be at least 1",
                    line.menu_item_id
                )));
            }
            let menu_item = self
                .menu
                .find_by_id(&line.menu_item_id)
                .await?
                .ok_or_else(|| {
                    OrderError::NotFound(format!("Menu item {} not found", line.menu_item_id))
                })?;
            items.push(OrderItem {
                menu_item_id: menu_item
                    .id
                    .as_ref()
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| line.menu_item_id.clone()),
                name: menu_item.name,
                quantity: line.quantity,
                unit_price: menu_item.price,
                special_request: line.special_request.clone(),
            });
        }

        let computed_total: Decimal = items.iter().map(OrderItem::line_total).sum();
        if computed_total != draft.total_amount {
            return Err(OrderError::Validation(format!(
                "Total amount mismatch: submitted {}, items sum to {}",
                draft.total_amount, computed_total
            )));
        }

        let now = Utc::now();
        let order = Order {
            id: None,
            customer_name: draft.customer_name,
            customer_type: draft.customer_type,
            user_id: draft.user_id,
            order_type: draft.order_type,
            apartment: draft.apartment,
            flat_no: draft.flat_no,
            address: draft.address,
            table_no: draft.table_no,
            delivery_note: draft.delivery_note,
            items,
            total_amount: computed_total,
            status: OrderStatus::OrderReceived,
            payment_status: PaymentStatus::Pending,
            payment_method: draft.payment_method,
            created_at: now,
            updated_at: now,
            estimated_ready_time: now + Duration::minutes(ESTIMATED_READY_MINUTES),
        };

        let created = self.orders.create(order).await?;

        let staff = draft
            .staff_name
            .unwrap_or_else(|| SYSTEM_STAFF_NAME.to_string());
        self.append_log(
            &created,
            staff,
            KitchenAction::Received,
            Some("Order created".to_string()),
        )
        .await;

        tracing::info!(
            order_id = %created.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            total = %created.total_amount,
            "Order created"
        );
        Ok(created)
    }

    /// Set a new lifecycle status.
    ///
    /// The transition is applied unconditionally: any status may follow any
    /// other, including back-transitions. A log entry is appended only when
    /// a staff name is supplied, with the action derived from the fixed
    /// status mapping.
    pub async fn update_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
        staff_name: Option<String>,
        note: Option<String>,
    ) -> OrderResult<Order> {
        let order = self
            .orders
            .update_status(order_id, new_status, Utc::now())
            .await?;

        if let Some(staff) = staff_name {
            self.append_log(&order, staff, KitchenAction::for_status(new_status), note)
                .await;
        }

        tracing::info!(order_id = %order_id, status = %new_status, "Order status updated");
        Ok(order)
    }

    /// Set a new payment status and optionally the payment method.
    ///
    /// With a staff name present, appends a `payment-updated` log entry; the
    /// note defaults to "Payment status updated to {status}".
    pub async fn update_payment(
        &self,
        order_id: &str,
        new_payment_status: PaymentStatus,
        payment_method: Option<PaymentMethod>,
        staff_name: Option<String>,
        note: Option<String>,
    ) -> OrderResult<Order> {
        let order = self
            .orders
            .update_payment(order_id, new_payment_status, payment_method, Utc::now())
            .await?;

        if let Some(staff) = staff_name {
            let note = note
                .unwrap_or_else(|| format!("Payment status updated to {new_payment_status}"));
            self.append_log(&order, staff, KitchenAction::PaymentUpdated, Some(note))
                .await;
        }

        tracing::info!(order_id = %order_id, payment_status = %new_payment_status, "Payment updated");
        Ok(order)
    }

    /// Append a kitchen-log entry for an order. Fire-and-forget: a failed
    /// append must never fail the primary mutation that triggered it.
    async fn append_log(
        &self,
        order: &Order,
        staff_name: String,
        action: KitchenAction,
        note: Option<String>,
    ) {
        let Some(order_id) = order.id.clone() else {
            tracing::warn!("Order record without id, skipping kitchen log append");
            return;
        };
        let entry = KitchenLog {
            id: None,
            order_id,
            staff_name,
            action,
            note,
            created_at: Utc::now(),
        };
        if let Err(e) = self.logs.append(entry).await {
            tracing::warn!(error = %e, action = %action, "Failed to append kitchen log entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::db::models::{CategoryCreate, MenuItemCreate, OrderDraftItem};
    use crate::db::repository::{CategoryRepository, RepoError};
    use shared::models::OrderType;

    struct TestContext {
        lifecycle: OrderLifecycle,
        logs: KitchenLogRepository,
        burger_id: String,
        fries_id: String,
    }

    async fn setup() -> TestContext {
        let db = db::memory().await.expect("Failed to open in-memory db");

        let categories = CategoryRepository::new(db.clone());
        let category = categories
            .create(CategoryCreate {
                name: "Snacks".to_string(),
                description: None,
                image: None,
                sort_order: None,
            })
            .await
            .expect("Failed to create category");
        let category_id = category.id.as_ref().unwrap().to_string();

        let menu = MenuItemRepository::new(db.clone());
        let burger = menu
            .create(MenuItemCreate {
                name: "Burger".to_string(),
                description: None,
                price: Decimal::from(150),
                image: None,
                category_id: category_id.clone(),
                is_veg: Some(false),
                is_available: Some(true),
                sort_order: None,
            })
            .await
            .expect("Failed to create burger");
        let fries = menu
            .create(MenuItemCreate {
                name: "Fries".to_string(),
                description: None,
                price: Decimal::from(80),
                image: None,
                category_id,
                is_veg: Some(true),
                is_available: Some(true),
                sort_order: None,
            })
            .await
            .expect("Failed to create fries");

        TestContext {
            lifecycle: OrderLifecycle::new(db.clone()),
            logs: KitchenLogRepository::new(db),
            burger_id: burger.id.unwrap().to_string(),
            fries_id: fries.id.unwrap().to_string(),
        }
    }

    fn draft(ctx: &TestContext, total: i64) -> OrderDraft {
        OrderDraft {
            customer_name: "Asha".to_string(),
            customer_type: Default::default(),
            user_id: None,
            order_type: OrderType::WalkUp,
            apartment: None,
            flat_no: None,
            address: None,
            table_no: None,
            delivery_note: None,
            items: vec![
                OrderDraftItem {
                    menu_item_id: ctx.burger_id.clone(),
                    quantity: 2,
                    special_request: None,
                },
                OrderDraftItem {
                    menu_item_id: ctx.fries_id.clone(),
                    quantity: 1,
                    special_request: Some("extra salt".to_string()),
                },
            ],
            total_amount: Decimal::from(total),
            payment_method: None,
            staff_name: None,
        }
    }

    #[tokio::test]
    async fn test_create_forces_received_status() {
        let ctx = setup().await;

        let order = ctx.lifecycle.create_order(draft(&ctx, 380)).await.unwrap();
        let order_id = order.id.as_ref().unwrap().to_string();

        assert_eq!(order.status, OrderStatus::OrderReceived);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.total_amount, Decimal::from(380));
        assert_eq!(
            order.estimated_ready_time,
            order.created_at + Duration::minutes(ESTIMATED_READY_MINUTES)
        );

        // Price/name snapshots come from the menu store
        assert_eq!(order.items[0].name, "Burger");
        assert_eq!(order.items[0].unit_price, Decimal::from(150));

        // Exactly one creation log entry, attributed to System
        let entries = ctx.logs.find_by_order(&order_id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, KitchenAction::Received);
        assert_eq!(entries[0].staff_name, SYSTEM_STAFF_NAME);
        assert_eq!(entries[0].note.as_deref(), Some("Order created"));
    }

    #[tokio::test]
    async fn test_create_rejects_total_mismatch() {
        let ctx = setup().await;

        let err = ctx.lifecycle.create_order(draft(&ctx, 400)).await.unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_menu_item() {
        let ctx = setup().await;

        let mut d = draft(&ctx, 380);
        d.items[0].menu_item_id = "menu_item:missing".to_string();
        let err = ctx.lifecycle.create_order(d).await.unwrap_err();
        assert!(matches!(err, OrderError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_status_update_logs_mapped_action() {
        let ctx = setup().await;
        let order = ctx.lifecycle.create_order(draft(&ctx, 380)).await.unwrap();
        let order_id = order.id.as_ref().unwrap().to_string();

        ctx.lifecycle
            .update_status(&order_id, OrderStatus::Cooking, Some("Alice".to_string()), None)
            .await
            .unwrap();
        // out-for-delivery has no dedicated action and is logged as received
        ctx.lifecycle
            .update_status(
                &order_id,
                OrderStatus::OutForDelivery,
                Some("Alice".to_string()),
                None,
            )
            .await
            .unwrap();

        let entries = ctx.logs.find_by_order(&order_id).await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].action, KitchenAction::StartedCooking);
        assert_eq!(entries[1].staff_name, "Alice");
        assert_eq!(entries[2].action, KitchenAction::Received);
    }

    #[tokio::test]
    async fn test_status_update_without_staff_appends_nothing() {
        let ctx = setup().await;
        let order = ctx.lifecycle.create_order(draft(&ctx, 380)).await.unwrap();
        let order_id = order.id.as_ref().unwrap().to_string();

        let updated = ctx
            .lifecycle
            .update_status(&order_id, OrderStatus::Cancelled, None, None)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Cancelled);

        // Only the creation entry exists
        let entries = ctx.logs.find_by_order(&order_id).await.unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_back_transitions_are_allowed() {
        let ctx = setup().await;
        let order = ctx.lifecycle.create_order(draft(&ctx, 380)).await.unwrap();
        let order_id = order.id.as_ref().unwrap().to_string();

        ctx.lifecycle
            .update_status(&order_id, OrderStatus::Delivered, None, None)
            .await
            .unwrap();
        let back = ctx
            .lifecycle
            .update_status(&order_id, OrderStatus::OrderReceived, None, None)
            .await
            .unwrap();
        assert_eq!(back.status, OrderStatus::OrderReceived);
    }

    #[tokio::test]
    async fn test_payment_update_defaults_note() {
        let ctx = setup().await;
        let order = ctx.lifecycle.create_order(draft(&ctx, 380)).await.unwrap();
        let order_id = order.id.as_ref().unwrap().to_string();

        let updated = ctx
            .lifecycle
            .update_payment(
                &order_id,
                PaymentStatus::Paid,
                Some(PaymentMethod::Upi),
                Some("Carol".to_string()),
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.payment_status, PaymentStatus::Paid);
        assert_eq!(updated.payment_method, Some(PaymentMethod::Upi));

        let entries = ctx.logs.find_by_order(&order_id).await.unwrap();
        let last = entries.last().unwrap();
        assert_eq!(last.action, KitchenAction::PaymentUpdated);
        assert_eq!(last.staff_name, "Carol");
        assert_eq!(last.note.as_deref(), Some("Payment status updated to paid"));
    }

    #[tokio::test]
    async fn test_update_unknown_order_fails_not_found() {
        let ctx = setup().await;

        let err = ctx
            .lifecycle
            .update_status("orders:missing", OrderStatus::Cooking, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Storage(RepoError::NotFound(_))));

        let err = ctx
            .lifecycle
            .update_payment("orders:missing", PaymentStatus::Paid, None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Storage(RepoError::NotFound(_))));
    }
}
