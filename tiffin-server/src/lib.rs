//! Tiffin Server - 扫码点餐与厨房管理服务端
//!
//! # 架构概述
//!
//! 本模块是 Tiffin 服务端的主入口，提供以下核心功能：
//!
//! - **订单生命周期** (`orders`): 创建、状态/支付流转、厨房日志
//! - **购物车** (`cart`): 桌台会话购物车
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **认证** (`auth`): JWT + argon2 员工认证
//! - **OTP** (`otp`): 2Factor 短信验证码网关
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! tiffin-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、角色中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! ├── orders/        # 订单生命周期
//! ├── cart/          # 购物车
//! ├── otp/           # 短信 OTP 网关
//! ├── sync/          # 变更广播
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod cart;
pub mod core;
pub mod db;
pub mod orders;
pub mod otp;
pub mod sync;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentStaff, JwtService, StaffRole};
pub use cart::{Cart, CartStore};
pub use core::{Config, Server, ServerState, setup_environment};
pub use orders::{OrderError, OrderLifecycle};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
  ______ _  ____  ____ _
 /_  __/(_)/ __/ / __/(_)___
  / /  / // /_  / /_ / // __ \
 / /  / // __/ / __// // / / /
/_/  /_//_/   /_/  /_//_/ /_/
    "#
    );
}
