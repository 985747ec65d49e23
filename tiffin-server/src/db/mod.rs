//! Database Module
//!
//! 嵌入式 SurrealDB：生产环境使用 RocksDB 引擎，测试使用内存引擎。
//! 表结构无模式，启动时定义二级索引。

pub mod models;
pub mod repository;

use crate::utils::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "tiffin";
const DATABASE: &str = "main";

/// Open the embedded database at the given path (RocksDB engine)
pub async fn open(path: &Path) -> Result<Surreal<Db>, AppError> {
    let path_str = path.to_string_lossy().to_string();
    let db = Surreal::new::<RocksDb>(path_str)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
    init(&db).await?;
    tracing::info!(path = %path.display(), "Database opened (embedded RocksDB)");
    Ok(db)
}

/// Open an in-memory database (tests and ephemeral runs)
pub async fn memory() -> Result<Surreal<Db>, AppError> {
    let db = Surreal::new::<Mem>(())
        .await
        .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
    init(&db).await?;
    Ok(db)
}

async fn init(db: &Surreal<Db>) -> Result<(), AppError> {
    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;
    define_indexes(db)
        .await
        .map_err(|e| AppError::database(format!("Failed to define indexes: {e}")))?;
    Ok(())
}

/// Secondary indexes for the hot lookups: kitchen views filter orders by
/// status, log listings fetch by order, the menu page fetches by category.
async fn define_indexes(db: &Surreal<Db>) -> Result<(), surrealdb::Error> {
    db.query("DEFINE INDEX IF NOT EXISTS idx_orders_status ON TABLE orders COLUMNS status")
        .await?;
    db.query("DEFINE INDEX IF NOT EXISTS idx_orders_user ON TABLE orders COLUMNS user_id")
        .await?;
    db.query("DEFINE INDEX IF NOT EXISTS idx_kitchen_log_order ON TABLE kitchen_log COLUMNS order_id")
        .await?;
    db.query("DEFINE INDEX IF NOT EXISTS idx_menu_item_category ON TABLE menu_item COLUMNS category")
        .await?;
    db.query("DEFINE INDEX IF NOT EXISTS idx_category_name ON TABLE category COLUMNS name")
        .await?;
    Ok(())
}
