//! Auth API 模块

mod handler;

use axum::{
    Router,
    middleware,
    routing::{get, post},
};

use crate::auth::require_kitchen;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    let public = Router::new()
        .route("/admin/login", post(handler::admin_login))
        .route("/kitchen/login", post(handler::kitchen_login))
        .route("/logout", post(handler::logout))
        .route("/otp/send", post(handler::send_otp))
        .route("/otp/verify", post(handler::verify_otp));

    // Any staff role can ask who it is
    let staff = Router::new()
        .route("/me", get(handler::me))
        .route_layer(middleware::from_fn(require_kitchen));

    public.merge(staff)
}
