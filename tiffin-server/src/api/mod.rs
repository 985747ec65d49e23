//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 员工登录与 OTP 接口
//! - [`categories`] - 分类管理接口
//! - [`menu`] - 菜单管理接口
//! - [`orders`] - 订单与厨房日志接口
//! - [`carts`] - 桌台购物车接口
//! - [`sync`] - 变更推送 (SSE)

pub mod auth;
pub mod carts;
pub mod categories;
pub mod health;
pub mod menu;
pub mod orders;
pub mod sync;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health API - public route
        .merge(health::router())
        // Auth API - logins, OTP, session info
        .merge(auth::router())
        // Catalog APIs - public reads, admin mutations
        .merge(categories::router())
        .merge(menu::router())
        // Order APIs - public creation/tracking, staff transitions
        .merge(orders::router())
        // Table cart flow - public
        .merge(carts::router())
        // Change feed - staff only
        .merge(sync::router())
}

/// Build a fully configured application with all middleware
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // ========== Application Middleware ==========
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // Staff identity (JWT) - executes before routes, injects CurrentStaff
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::authenticate,
        ))
}
