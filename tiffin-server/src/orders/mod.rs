//! Order lifecycle module
//!
//! - **lifecycle**: creation and status/payment transitions with the paired
//!   kitchen-log audit trail
//! - **error**: layered error types (`RepoError` → `OrderError` → `AppError`)
//!
//! 状态轴与支付轴相互独立，均为全连通图：不存在非法迁移，唯一的失败
//! 模式是订单 id 不存在。并发更新为 last-write-wins，无乐观锁。

pub mod error;
pub mod lifecycle;

// Re-exports
pub use error::{OrderError, OrderResult};
pub use lifecycle::{ESTIMATED_READY_MINUTES, OrderLifecycle};
