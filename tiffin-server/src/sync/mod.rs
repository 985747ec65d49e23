//! Change feed
//!
//! 资源变更通知：每次成功的写操作广播一条 [`SyncEvent`]，厨房/管理端
//! 通过 SSE 订阅。发布是 fire-and-forget，订阅端掉线不影响写路径。

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;

/// Event broadcast channel capacity
pub const SYNC_CHANNEL_CAPACITY: usize = 1024;

/// Resource change notification
#[derive(Debug, Clone, Serialize)]
pub struct SyncEvent {
    /// 资源类型 (如 "orders", "menu_item", "category")
    pub resource: String,
    /// 变更类型 ("created", "updated", "deleted", ...)
    pub action: String,
    /// 资源 ID
    pub id: String,
    /// 该资源类型的单调递增版本号
    pub version: u64,
    /// 资源数据 (deleted 时为 None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理。每种资源类型维护独立的
/// 版本号，支持原子递增；客户端用版本号判断数据新旧。
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    /// 创建空的版本管理器
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// 递增指定资源的版本号并返回新值
    ///
    /// 如果资源不存在，从 0 开始递增（返回 1）
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 获取指定资源的当前版本号
    ///
    /// 如果资源不存在，返回 0
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_increment_per_resource() {
        let versions = ResourceVersions::new();
        assert_eq!(versions.get("orders"), 0);
        assert_eq!(versions.increment("orders"), 1);
        assert_eq!(versions.increment("orders"), 2);
        assert_eq!(versions.increment("menu_item"), 1);
        assert_eq!(versions.get("orders"), 2);
    }
}
