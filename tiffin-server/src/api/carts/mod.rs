//! Table cart API 模块
//!
//! 桌台扫码点餐流程：购物车累积 → 结账生成订单。

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables/{table}/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_cart).delete(handler::clear_cart))
        .route("/items", post(handler::add_item))
        .route(
            "/items/{menu_item_id}",
            put(handler::update_quantity).delete(handler::remove_item),
        )
        .route("/checkout", post(handler::checkout))
}
