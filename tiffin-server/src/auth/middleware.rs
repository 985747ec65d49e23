//! 认证中间件
//!
//! 为 JWT 认证和授权提供 Axum 中间件。
//!
//! [`authenticate`] 在所有路由之前运行：从 `Authorization: Bearer` 头或
//! httpOnly cookie (`admin_token` / `kitchen_token`) 提取并验证令牌，
//! 验证成功后将 [`CurrentStaff`] 注入请求扩展。公开路由不受影响；
//! 角色路由通过 [`require_admin`] / [`require_kitchen`] 检查扩展。
//!
//! # 错误处理
//!
//! | 情况 | 结果 |
//! |------|------|
//! | 无令牌访问角色路由 | 401 Unauthorized |
//! | 角色不符 | 403 Forbidden |
//! | 无效/过期令牌 | 视为未登录 (记录安全日志) |

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentStaff, JwtService, StaffRole};
use crate::core::ServerState;
use crate::utils::AppError;

// ── Cookie helpers ──────────────────────────────────────────────────

/// Set-Cookie value for a freshly issued role token
pub fn session_cookie(role: StaffRole, token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        role.cookie_name(),
        token,
        max_age_secs
    )
}

/// Set-Cookie value that clears a role cookie
pub fn clear_session_cookie(role: StaffRole) -> String {
    format!(
        "{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax",
        role.cookie_name()
    )
}

/// Read a named cookie from the request
fn cookie_value(req: &Request, name: &str) -> Option<String> {
    for header in req.headers().get_all(http::header::COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((k, v)) = pair.trim().split_once('=')
                && k == name
            {
                return Some(v.to_string());
            }
        }
    }
    None
}

/// Tokens to try, in priority order: Bearer header, then role cookies
fn token_candidates(req: &Request) -> Vec<String> {
    let mut candidates = Vec::new();
    if let Some(header) = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        && let Some(token) = JwtService::extract_from_header(header)
    {
        candidates.push(token.to_string());
    }
    for role in [StaffRole::Admin, StaffRole::Kitchen] {
        if let Some(token) = cookie_value(req, role.cookie_name()) {
            candidates.push(token);
        }
    }
    candidates
}

// ── Middleware ──────────────────────────────────────────────────────

/// 认证中间件 - 提取并验证员工令牌
///
/// 不拒绝任何请求：没有有效令牌时照常放行，由角色中间件决定是否拦截。
pub async fn authenticate(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Response {
    let jwt_service = state.get_jwt_service();

    for token in token_candidates(&req) {
        match jwt_service.validate_token(&token) {
            Ok(claims) => {
                req.extensions_mut().insert(CurrentStaff::from(claims));
                break;
            }
            Err(e) => {
                tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Rejected staff token");
            }
        }
    }

    next.run(req).await
}

/// 管理员中间件 - 要求 admin 角色
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let staff = req
        .extensions()
        .get::<CurrentStaff>()
        .ok_or_else(AppError::unauthorized)?;
    if !staff.is_admin() {
        tracing::warn!(target: "security", role = %staff.role, uri = %req.uri(), "Admin route denied");
        return Err(AppError::forbidden("Admin role required"));
    }
    Ok(next.run(req).await)
}

/// 厨房中间件 - 要求 kitchen 或 admin 角色
pub async fn require_kitchen(req: Request, next: Next) -> Result<Response, AppError> {
    let staff = req
        .extensions()
        .get::<CurrentStaff>()
        .ok_or_else(AppError::unauthorized)?;
    if !staff.can_access_kitchen() {
        tracing::warn!(target: "security", role = %staff.role, uri = %req.uri(), "Kitchen route denied");
        return Err(AppError::forbidden("Kitchen role required"));
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_shape() {
        let cookie = session_cookie(StaffRole::Admin, "tok", 86400);
        assert!(cookie.starts_with("admin_token=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=86400"));

        let cleared = clear_session_cookie(StaffRole::Kitchen);
        assert!(cleared.starts_with("kitchen_token=;"));
        assert!(cleared.contains("Max-Age=0"));
    }
}
