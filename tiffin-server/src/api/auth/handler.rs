//! Authentication Handlers
//!
//! Staff logins (httpOnly cookie sessions) and customer OTP dispatch/verify.

use std::time::Duration;

use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use http::HeaderValue;
use http::header::SET_COOKIE;
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentStaff, StaffRole, clear_session_cookie, session_cookie};
use crate::core::ServerState;
use crate::utils::validation::{validate_otp, validate_phone};
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub role: StaffRole,
    pub token: String,
    pub expires_in_minutes: i64,
}

/// POST /api/auth/admin/login - 管理员登录
pub async fn admin_login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    login(state, StaffRole::Admin, req).await
}

/// POST /api/auth/kitchen/login - 厨房登录
pub async fn kitchen_login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    login(state, StaffRole::Kitchen, req).await
}

async fn login(
    state: ServerState,
    role: StaffRole,
    req: LoginRequest,
) -> Result<Response, AppError> {
    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    if !state.credentials.verify(role, &req.password)? {
        tracing::warn!(target: "security", role = %role, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;
    let minutes = state.jwt_service.expiration_minutes(role);

    let cookie = session_cookie(role, &token, minutes * 60);
    let mut response = Json(LoginResponse {
        role,
        token,
        expires_in_minutes: minutes,
    })
    .into_response();
    response.headers_mut().append(
        SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::internal(format!("Invalid cookie value: {}", e)))?,
    );

    tracing::info!(role = %role, "Staff login");
    Ok(response)
}

/// POST /api/auth/logout - 退出登录 (清除两个角色 cookie)
pub async fn logout() -> Response {
    let mut response = Json(serde_json::json!({ "success": true })).into_response();
    for role in [StaffRole::Admin, StaffRole::Kitchen] {
        if let Ok(value) = HeaderValue::from_str(&clear_session_cookie(role)) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

/// GET /api/auth/me - 当前员工信息
pub async fn me(Extension(staff): Extension<CurrentStaff>) -> Json<CurrentStaff> {
    Json(staff)
}

// ========== OTP ==========

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct SendOtpResponse {
    pub session_id: String,
}

/// POST /api/auth/otp/send - 发送验证码
pub async fn send_otp(
    State(state): State<ServerState>,
    Json(req): Json<SendOtpRequest>,
) -> AppResult<Json<SendOtpResponse>> {
    validate_phone(&req.phone)?;
    let session = state.otp.send_otp(&req.phone, None).await?;
    Ok(Json(SendOtpResponse {
        session_id: session.session_id,
    }))
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub phone: String,
    pub otp: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub details: String,
}

/// POST /api/auth/otp/verify - 校验验证码
///
/// 验证码不匹配返回 `success: false`，不是错误；只有网关/配置故障报错。
pub async fn verify_otp(
    State(state): State<ServerState>,
    Json(req): Json<VerifyOtpRequest>,
) -> AppResult<Json<VerifyOtpResponse>> {
    validate_phone(&req.phone)?;
    validate_otp(&req.otp)?;
    let verification = state.otp.verify_otp(&req.phone, &req.otp).await?;
    Ok(Json(VerifyOtpResponse {
        success: verification.success,
        details: verification.details,
    }))
}
