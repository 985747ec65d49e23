//! Order Model
//!
//! 订单持久化实体。条目与总额创建后不可变，状态/支付变更只经由
//! [`OrderLifecycle`](crate::orders::OrderLifecycle) 打补丁。

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{CustomerType, OrderItem, OrderStatus, OrderType, PaymentMethod, PaymentStatus};
use surrealdb::RecordId;

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub customer_name: String,
    pub customer_type: CustomerType,
    pub user_id: Option<String>,
    pub order_type: OrderType,
    pub apartment: Option<String>,
    pub flat_no: Option<String>,
    pub address: Option<String>,
    pub table_no: Option<String>,
    pub delivery_note: Option<String>,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub estimated_ready_time: DateTime<Utc>,
}

impl From<Order> for shared::models::Order {
    fn from(o: Order) -> Self {
        Self {
            id: o.id.map(|t| t.to_string()).unwrap_or_default(),
            customer_name: o.customer_name,
            customer_type: o.customer_type,
            user_id: o.user_id,
            order_type: o.order_type,
            apartment: o.apartment,
            flat_no: o.flat_no,
            address: o.address,
            table_no: o.table_no,
            delivery_note: o.delivery_note,
            items: o.items,
            total_amount: o.total_amount,
            status: o.status,
            payment_status: o.payment_status,
            payment_method: o.payment_method,
            created_at: o.created_at,
            updated_at: o.updated_at,
            estimated_ready_time: o.estimated_ready_time,
        }
    }
}

/// Draft line item as submitted by a client — only the menu reference,
/// quantity and note; name and price are snapshotted server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraftItem {
    /// Menu item id ("menu_item:xxx" or bare id)
    pub menu_item_id: String,
    pub quantity: u32,
    pub special_request: Option<String>,
}

/// Order draft (create payload)
///
/// Carries no status field: the initial status is forced by the lifecycle
/// controller, nothing on the input can override it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_name: String,
    #[serde(default)]
    pub customer_type: CustomerType,
    pub user_id: Option<String>,
    #[serde(default)]
    pub order_type: OrderType,
    pub apartment: Option<String>,
    pub flat_no: Option<String>,
    pub address: Option<String>,
    pub table_no: Option<String>,
    pub delivery_note: Option<String>,
    pub items: Vec<OrderDraftItem>,
    /// Client-computed total; must equal the sum of snapshotted line totals
    pub total_amount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    /// Staff member recorded in the creation log entry (walk-up flow)
    pub staff_name: Option<String>,
}
