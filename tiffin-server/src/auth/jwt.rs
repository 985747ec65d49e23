//! JWT 令牌服务
//!
//! 处理员工令牌的生成、验证和解析。两种角色：admin (24 小时) 与
//! kitchen (7 天)，Claims 只携带 `{role, iat, exp}`。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 员工角色
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Kitchen,
}

impl StaffRole {
    /// httpOnly cookie 名称
    pub fn cookie_name(&self) -> &'static str {
        match self {
            StaffRole::Admin => "admin_token",
            StaffRole::Kitchen => "kitchen_token",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffRole::Admin => f.write_str("admin"),
            StaffRole::Kitchen => f.write_str("kitchen"),
        }
    }
}

/// JWT 配置
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// JWT 密钥 (应至少 32 字节)
    pub secret: String,
    /// admin 令牌有效期 (分钟)
    pub admin_expiration_minutes: i64,
    /// kitchen 令牌有效期 (分钟)
    pub kitchen_expiration_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = match load_jwt_secret() {
            Ok(secret) => secret,
            Err(e) => {
                #[cfg(debug_assertions)]
                {
                    tracing::warn!("JWT configuration error: {}, using generated dev key", e);
                    generate_dev_jwt_secret()
                }
                #[cfg(not(debug_assertions))]
                {
                    panic!("🚨 FATAL: JWT_SECRET configuration failed: {}", e);
                }
            }
        };

        Self {
            secret,
            admin_expiration_minutes: std::env::var("ADMIN_TOKEN_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24 * 60),
            kitchen_expiration_minutes: std::env::var("KITCHEN_TOKEN_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(7 * 24 * 60),
        }
    }
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 角色
    pub role: StaffRole,
    /// 签发时间戳
    pub iat: i64,
    /// 过期时间戳
    pub exp: i64,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// 从环境变量安全地加载 JWT 密钥
fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < 32 {
                return Err(JwtError::ConfigError(
                    "JWT_SECRET must be at least 32 characters long".to_string(),
                ));
            }
            Ok(secret)
        }
        Err(_) => Err(JwtError::ConfigError(
            "JWT_SECRET environment variable is not set".to_string(),
        )),
    }
}

/// 生成开发环境临时密钥 (64 hex chars)
#[cfg(debug_assertions)]
fn generate_dev_jwt_secret() -> String {
    format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}

/// JWT 令牌服务
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// 使用默认配置创建新的 JWT 服务
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 角色对应的令牌有效期 (分钟)
    pub fn expiration_minutes(&self, role: StaffRole) -> i64 {
        match role {
            StaffRole::Admin => self.config.admin_expiration_minutes,
            StaffRole::Kitchen => self.config.kitchen_expiration_minutes,
        }
    }

    /// 为角色生成新令牌
    pub fn generate_token(&self, role: StaffRole) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.expiration_minutes(role));

        let claims = Claims {
            role,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "iat"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// 当前员工上下文 (从 JWT Claims 解析)
///
/// 由认证中间件创建，注入到请求扩展
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CurrentStaff {
    pub role: StaffRole,
}

impl From<Claims> for CurrentStaff {
    fn from(claims: Claims) -> Self {
        Self { role: claims.role }
    }
}

impl CurrentStaff {
    /// 是否管理员
    pub fn is_admin(&self) -> bool {
        self.role == StaffRole::Admin
    }

    /// 厨房视图权限：kitchen 或 admin
    pub fn can_access_kitchen(&self) -> bool {
        matches!(self.role, StaffRole::Kitchen | StaffRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-test-secret-test-secret!".to_string(),
            admin_expiration_minutes: 24 * 60,
            kitchen_expiration_minutes: 7 * 24 * 60,
        }
    }

    #[test]
    fn test_jwt_generation_and_validation() {
        let service = JwtService::with_config(test_config());

        let token = service
            .generate_token(StaffRole::Admin)
            .expect("Failed to generate test token");
        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.role, StaffRole::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_role_expirations_differ() {
        let service = JwtService::with_config(test_config());

        let admin = service.generate_token(StaffRole::Admin).unwrap();
        let kitchen = service.generate_token(StaffRole::Kitchen).unwrap();

        let admin_claims = service.validate_token(&admin).unwrap();
        let kitchen_claims = service.validate_token(&kitchen).unwrap();

        // admin 24h, kitchen 7d
        assert_eq!(admin_claims.exp - admin_claims.iat, 24 * 3600);
        assert_eq!(kitchen_claims.exp - kitchen_claims.iat, 7 * 24 * 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let mut config = test_config();
        config.admin_expiration_minutes = -10;
        let service = JwtService::with_config(config);

        let token = service.generate_token(StaffRole::Admin).unwrap();
        let err = service.validate_token(&token).unwrap_err();
        assert!(matches!(err, JwtError::ExpiredToken));
    }

    #[test]
    fn test_foreign_secret_is_rejected() {
        let service = JwtService::with_config(test_config());
        let other = JwtService::with_config(JwtConfig {
            secret: "another-secret-another-secret-another!".to_string(),
            ..test_config()
        });

        let token = other.generate_token(StaffRole::Kitchen).unwrap();
        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
