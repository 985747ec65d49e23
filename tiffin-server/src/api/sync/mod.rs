//! Sync API 模块 (SSE 变更推送)
//!
//! 厨房/管理端订阅此端点即可在订单、菜单变更时实时刷新视图。

use std::convert::Infallible;

use axum::{
    Router,
    extract::State,
    middleware,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::Stream;
use tokio::sync::broadcast::error::RecvError;

use crate::auth::require_kitchen;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sync", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/events", get(events))
        .route_layer(middleware::from_fn(require_kitchen))
}

/// GET /api/sync/events - 变更事件流
async fn events(
    State(state): State<ServerState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe_sync();

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => match Event::default().event(event.resource.clone()).json_data(&event) {
                    Ok(sse_event) => return Some((Ok(sse_event), rx)),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to encode sync event");
                        continue;
                    }
                },
                // 消费太慢丢了事件：继续，客户端靠重新拉取兜底
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "SSE subscriber lagged behind the change feed");
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
