use crate::auth::JwtConfig;
use std::path::PathBuf;

/// 服务器配置 - 所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/tiffin | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | ADMIN_PASSWORD_HASH | - | 管理员密码哈希 (argon2 PHC) |
/// | KITCHEN_PASSWORD_HASH | - | 厨房密码哈希 (argon2 PHC) |
/// | OTP_API_KEY | - | 2Factor API key |
/// | OTP_TEMPLATE | - | 2Factor 短信模板名 |
/// | OTP_COUNTRY_CODE | 91 | 手机号国家码 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/tiffin HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,

    // === 员工登录 ===
    /// 管理员密码哈希 (argon2 PHC 字符串)
    pub admin_password_hash: Option<String>,
    /// 厨房密码哈希 (argon2 PHC 字符串)
    pub kitchen_password_hash: Option<String>,

    // === OTP 网关 ===
    /// 2Factor API key (未设置时 OTP 接口返回上游错误)
    pub otp_api_key: Option<String>,
    /// 2Factor 短信模板名
    pub otp_template: Option<String>,
    /// 手机号国家码 (不带加号)
    pub otp_country_code: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/tiffin".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            admin_password_hash: std::env::var("ADMIN_PASSWORD_HASH").ok(),
            kitchen_password_hash: std::env::var("KITCHEN_PASSWORD_HASH").ok(),

            otp_api_key: std::env::var("OTP_API_KEY").ok(),
            otp_template: std::env::var("OTP_TEMPLATE").ok(),
            otp_country_code: std::env::var("OTP_COUNTRY_CODE").unwrap_or_else(|_| "91".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录 (work_dir/logs)
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
