//! Category API 模块

mod handler;

use axum::{
    Router,
    middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/categories", routes())
}

fn routes() -> Router<ServerState> {
    let public = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let admin = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route_layer(middleware::from_fn(require_admin));

    public.merge(admin)
}
