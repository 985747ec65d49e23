//! Repository Module
//!
//! Provides CRUD operations for the SurrealDB tables. Repositories issue
//! single-record create/select/merge operations only; each operation is
//! atomic and read-after-write visible, there are no multi-record
//! transactions.

pub mod category;
pub mod kitchen_log;
pub mod menu_item;
pub mod order;

// Re-exports
pub use category::CategoryRepository;
pub use kitchen_log::KitchenLogRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// API 传入的 id 既可以是 "table:id" 也可以是裸 id；仓储层在访问前
// 通过 strip_table_prefix 归一化为裸 id，RecordId 负责拼回完整格式。

/// Extract the bare id if the given id carries the table prefix
/// (e.g., "category:xxx" -> "xxx")
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    match id.split_once(':') {
        Some((t, rest)) if t == table => rest,
        _ => id,
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_table_prefix() {
        assert_eq!(strip_table_prefix("category", "category:abc"), "abc");
        assert_eq!(strip_table_prefix("category", "abc"), "abc");
        // foreign prefix is left intact
        assert_eq!(strip_table_prefix("category", "menu_item:abc"), "menu_item:abc");
    }
}
