//! Order Model
//!
//! 订单实体与状态枚举。`status` 与 `payment_status` 是两条互相独立的状态轴：
//! 任意取值组合都是合法的，状态迁移也不做合法性限制（允许回退）。

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Status Axes
// ============================================================================

/// 订单履约状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// 已接单（创建时强制为此状态）
    #[default]
    OrderReceived,
    /// 制作中
    Cooking,
    /// 配送中
    OutForDelivery,
    /// 已送达
    Delivered,
    /// 已取消
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::OrderReceived => "order-received",
            OrderStatus::Cooking => "cooking",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// 支付状态（独立于履约状态）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// 支付方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
    Online,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Online => "online",
        };
        f.write_str(s)
    }
}

/// 订单类型
///
/// 地址字段按类型取用：dine-in 用 `table_no`，delivery 用
/// `apartment`/`flat_no`/`address`，walk-up 两者都不需要。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    #[default]
    DineIn,
    WalkUp,
    Delivery,
}

/// 客户类别
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    Authenticated,
    #[default]
    Guest,
}

// ============================================================================
// Order Entity
// ============================================================================

/// Order line item — name and unit price are snapshots taken from the menu
/// store at creation time and are never re-read afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Menu item reference (record id as string)
    pub menu_item_id: String,
    /// Name snapshot
    pub name: String,
    /// Quantity (>= 1)
    pub quantity: u32,
    /// Unit price snapshot
    pub unit_price: Decimal,
    /// Optional customer note for this line ("no onions", ...)
    pub special_request: Option<String>,
}

impl OrderItem {
    /// Line total (unit price × quantity)
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Order entity (API view, string id)
///
/// 条目列表与 `total_amount` 创建后不可变；唯一的变更途径是生命周期
/// 控制器对 `status` / `payment_status` 的更新。订单不会被删除。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_type: CustomerType,
    /// Linked user reference for authenticated customers
    pub user_id: Option<String>,
    pub order_type: OrderType,
    pub apartment: Option<String>,
    pub flat_no: Option<String>,
    pub address: Option<String>,
    pub table_no: Option<String>,
    pub delivery_note: Option<String>,
    pub items: Vec<OrderItem>,
    /// Equals the sum of line totals at creation time
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Creation time + fixed 30-minute offset
    pub estimated_ready_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_strings() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out-for-delivery\"");
        let back: OrderStatus = serde_json::from_str("\"order-received\"").unwrap();
        assert_eq!(back, OrderStatus::OrderReceived);
    }

    #[test]
    fn test_payment_wire_strings() {
        assert_eq!(serde_json::to_string(&PaymentStatus::Paid).unwrap(), "\"paid\"");
        assert_eq!(serde_json::to_string(&PaymentMethod::Upi).unwrap(), "\"upi\"");
        assert_eq!(PaymentStatus::Paid.to_string(), "paid");
    }

    #[test]
    fn test_order_type_wire_strings() {
        assert_eq!(serde_json::to_string(&OrderType::DineIn).unwrap(), "\"dine-in\"");
        assert_eq!(serde_json::to_string(&OrderType::WalkUp).unwrap(), "\"walk-up\"");
    }

    #[test]
    fn test_line_total() {
        let item = OrderItem {
            menu_item_id: "menu_item:burger".into(),
            name: "Burger".into(),
            quantity: 3,
            unit_price: Decimal::from(150),
            special_request: None,
        };
        assert_eq!(item.line_total(), Decimal::from(450));
    }
}
