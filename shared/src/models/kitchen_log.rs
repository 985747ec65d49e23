//! Kitchen Log Model
//!
//! 厨房操作审计条目：每次状态/支付变更（带操作员名）追加一条，只增不改。

use super::order::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Staff name recorded when the caller does not supply one
pub const SYSTEM_STAFF_NAME: &str = "System";

/// Action tag recorded in a kitchen-log entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum KitchenAction {
    Received,
    StartedCooking,
    Completed,
    Cancelled,
    PaymentUpdated,
}

impl KitchenAction {
    /// Fixed mapping from a status transition to the logged action.
    ///
    /// `out-for-delivery` has no dedicated action and is logged as
    /// `received`, same as `order-received`.
    pub fn for_status(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Cooking => KitchenAction::StartedCooking,
            OrderStatus::Delivered => KitchenAction::Completed,
            OrderStatus::Cancelled => KitchenAction::Cancelled,
            OrderStatus::OrderReceived | OrderStatus::OutForDelivery => KitchenAction::Received,
        }
    }
}

impl fmt::Display for KitchenAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KitchenAction::Received => "received",
            KitchenAction::StartedCooking => "started-cooking",
            KitchenAction::Completed => "completed",
            KitchenAction::Cancelled => "cancelled",
            KitchenAction::PaymentUpdated => "payment-updated",
        };
        f.write_str(s)
    }
}

/// Kitchen log entry (API view, string ids)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenLogEntry {
    pub id: String,
    /// Owning order reference
    pub order_id: String,
    pub staff_name: String,
    pub action: KitchenAction,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_strings() {
        assert_eq!(
            serde_json::to_string(&KitchenAction::StartedCooking).unwrap(),
            "\"started-cooking\""
        );
        assert_eq!(
            serde_json::to_string(&KitchenAction::PaymentUpdated).unwrap(),
            "\"payment-updated\""
        );
    }

    #[test]
    fn test_status_to_action_mapping() {
        assert_eq!(
            KitchenAction::for_status(OrderStatus::Cooking),
            KitchenAction::StartedCooking
        );
        assert_eq!(
            KitchenAction::for_status(OrderStatus::Delivered),
            KitchenAction::Completed
        );
        assert_eq!(
            KitchenAction::for_status(OrderStatus::Cancelled),
            KitchenAction::Cancelled
        );
        assert_eq!(
            KitchenAction::for_status(OrderStatus::OrderReceived),
            KitchenAction::Received
        );
        // out-for-delivery is logged as received, not as a dedicated action
        assert_eq!(
            KitchenAction::for_status(OrderStatus::OutForDelivery),
            KitchenAction::Received
        );
    }
}
