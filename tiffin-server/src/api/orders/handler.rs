//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::OrderDraft;
use crate::db::repository::{KitchenLogRepository, OrderRepository};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{
    KitchenLogEntry, Order as SharedOrder, OrderStatus, PaymentMethod, PaymentStatus,
};

const RESOURCE: &str = "orders";

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

fn validate_draft(draft: &OrderDraft) -> Result<(), AppError> {
    validate_required_text(&draft.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_optional_text(&draft.apartment, "apartment", MAX_ADDRESS_LEN)?;
    validate_optional_text(&draft.flat_no, "flat_no", MAX_ADDRESS_LEN)?;
    validate_optional_text(&draft.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&draft.delivery_note, "delivery_note", MAX_NOTE_LEN)?;
    for item in &draft.items {
        validate_optional_text(&item.special_request, "special_request", MAX_NOTE_LEN)?;
    }
    Ok(())
}

/// POST /api/orders - 创建订单 (walk-up / delivery 直接提交)
pub async fn create(
    State(state): State<ServerState>,
    Json(draft): Json<OrderDraft>,
) -> AppResult<Json<SharedOrder>> {
    validate_draft(&draft)?;

    let order: SharedOrder = state.lifecycle().create_order(draft).await?.into();

    // 广播同步通知
    state.broadcast_sync(RESOURCE, "created", &order.id, Some(&order));

    Ok(Json(order))
}

/// GET /api/orders - 订单列表 (可按状态过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<SharedOrder>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = match query.status {
        Some(status) => repo.find_by_status(status, query.limit, query.offset).await?,
        None => repo.find_all(query.limit, query.offset).await?,
    };
    Ok(Json(orders.into_iter().map(|o| o.into()).collect()))
}

/// GET /api/orders/:id - 订单详情 (顾客跟踪页)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SharedOrder>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order.into()))
}

/// GET /api/orders/user/:user_id - 顾客历史订单
pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<SharedOrder>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_by_user(&user_id).await?;
    Ok(Json(orders.into_iter().map(|o| o.into()).collect()))
}

/// Status transition request
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
    pub staff_name: Option<String>,
    pub note: Option<String>,
}

/// PATCH /api/orders/:id/status - 更新订单状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<SharedOrder>> {
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.staff_name, "staff_name", MAX_NAME_LEN)?;

    let order: SharedOrder = state
        .lifecycle()
        .update_status(&id, payload.status, payload.staff_name, payload.note)
        .await?
        .into();

    // 广播同步通知
    state.broadcast_sync(RESOURCE, "status-updated", &order.id, Some(&order));

    Ok(Json(order))
}

/// Payment update request
#[derive(Debug, Deserialize)]
pub struct UpdatePaymentRequest {
    pub payment_status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub staff_name: Option<String>,
    pub note: Option<String>,
}

/// PATCH /api/orders/:id/payment - 更新支付状态
pub async fn update_payment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePaymentRequest>,
) -> AppResult<Json<SharedOrder>> {
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.staff_name, "staff_name", MAX_NAME_LEN)?;

    let order: SharedOrder = state
        .lifecycle()
        .update_payment(
            &id,
            payload.payment_status,
            payload.payment_method,
            payload.staff_name,
            payload.note,
        )
        .await?
        .into();

    // 广播同步通知
    state.broadcast_sync(RESOURCE, "payment-updated", &order.id, Some(&order));

    Ok(Json(order))
}

/// GET /api/orders/:id/log - 订单厨房日志
pub async fn list_log(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<KitchenLogEntry>>> {
    // Fail loudly for unknown orders instead of returning an empty list
    let orders = OrderRepository::new(state.db.clone());
    orders
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    let repo = KitchenLogRepository::new(state.db.clone());
    let entries = repo.find_by_order(&id).await?;
    Ok(Json(entries.into_iter().map(|e| e.into()).collect()))
}
