use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::broadcast;

use crate::auth::{JwtService, StaffCredentials};
use crate::cart::CartStore;
use crate::core::Config;
use crate::db;
use crate::orders::OrderLifecycle;
use crate::otp::{OtpGateway, TwoFactorClient};
use crate::sync::{ResourceVersions, SYNC_CHANNEL_CAPACITY, SyncEvent};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | credentials | Arc<StaffCredentials> | 员工登录凭证 |
/// | carts | Arc<CartStore> | 桌台购物车存储 |
/// | otp | Arc<dyn OtpGateway> | 短信 OTP 网关 |
/// | resource_versions | Arc<ResourceVersions> | 资源版本管理 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 员工登录凭证
    pub credentials: Arc<StaffCredentials>,
    /// 桌台购物车存储
    pub carts: Arc<CartStore>,
    /// 短信 OTP 网关
    pub otp: Arc<dyn OtpGateway>,
    /// 资源版本管理器 (用于 broadcast_sync 自动递增版本号)
    pub resource_versions: Arc<ResourceVersions>,
    /// 变更广播通道
    sync_tx: broadcast::Sender<SyncEvent>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("db", &"<Surreal>")
            .field("otp", &"<OtpGateway>")
            .finish()
    }
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/tiffin.db)
    /// 3. JWT、员工凭证、购物车、OTP 网关、变更广播
    ///
    /// # Panics
    ///
    /// 数据库或凭证初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("tiffin.db");
        let db = db::open(&db_path)
            .await
            .expect("Failed to initialize database");

        let otp: Arc<dyn OtpGateway> = Arc::new(TwoFactorClient::new(
            config.otp_api_key.clone(),
            config.otp_country_code.clone(),
            config.otp_template.clone(),
        ));

        Self::assemble(config.clone(), db, otp)
    }

    /// 使用现成的数据库和 OTP 网关组装状态 (测试场景)
    pub fn assemble(config: Config, db: Surreal<Db>, otp: Arc<dyn OtpGateway>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let credentials = Arc::new(
            StaffCredentials::resolve(
                config.admin_password_hash.clone(),
                config.kitchen_password_hash.clone(),
            )
            .expect("Failed to resolve staff credentials"),
        );
        let (sync_tx, _) = broadcast::channel(SYNC_CHANNEL_CAPACITY);

        Self {
            config,
            db,
            jwt_service,
            credentials,
            carts: Arc::new(CartStore::new()),
            otp,
            resource_versions: Arc::new(ResourceVersions::new()),
            sync_tx,
        }
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 订单生命周期控制器
    pub fn lifecycle(&self) -> OrderLifecycle {
        OrderLifecycle::new(self.db.clone())
    }

    /// 订阅变更广播
    pub fn subscribe_sync(&self) -> broadcast::Receiver<SyncEvent> {
        self.sync_tx.subscribe()
    }

    /// 广播资源变更通知
    ///
    /// 版本号由 ResourceVersions 自动递增管理。发布失败 (无订阅者)
    /// 不影响写路径。
    ///
    /// # 参数
    /// - `resource`: 资源类型 (如 "orders", "menu_item", "category")
    /// - `action`: 变更类型 ("created", "updated", "deleted")
    /// - `id`: 资源 ID
    /// - `data`: 资源数据 (deleted 时为 None)
    pub fn broadcast_sync<T: serde::Serialize>(
        &self,
        resource: &str,
        action: &str,
        id: &str,
        data: Option<&T>,
    ) {
        let version = self.resource_versions.increment(resource);
        let event = SyncEvent {
            resource: resource.to_string(),
            action: action.to_string(),
            id: id.to_string(),
            version,
            data: data.and_then(|d| serde_json::to_value(d).ok()),
            timestamp: chrono::Utc::now(),
        };
        let _ = self.sync_tx.send(event);
    }
}
