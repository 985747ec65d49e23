//! 核心模块 - 配置、状态、服务器

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;

/// 设置运行环境 (dotenv + 日志)
///
/// 必须在任何 tracing 调用之前执行
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    crate::utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
