//! 认证模块
//!
//! - [`jwt`] - JWT 令牌服务与员工角色
//! - [`middleware`] - 认证与角色中间件
//! - [`password`] - argon2 密码哈希

pub mod jwt;
pub mod middleware;
pub mod password;

// Re-exports
pub use jwt::{Claims, CurrentStaff, JwtConfig, JwtError, JwtService, StaffRole};
pub use middleware::{authenticate, clear_session_cookie, require_admin, require_kitchen, session_cookie};
pub use password::{StaffCredentials, hash_password, verify_password};
