//! Order API 模块

mod handler;

use axum::{
    Router,
    middleware,
    routing::{get, patch, post},
};

use crate::auth::require_kitchen;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    // Customers create and track their own orders without a session
    let public = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/user/{user_id}", get(handler::list_by_user));

    // Kitchen/admin staff drive transitions and read the audit trail
    let staff = Router::new()
        .route("/", get(handler::list))
        .route("/{id}/status", patch(handler::update_status))
        .route("/{id}/payment", patch(handler::update_payment))
        .route("/{id}/log", get(handler::list_log))
        .route_layer(middleware::from_fn(require_kitchen));

    public.merge(staff)
}
