//! Table cart handlers
//!
//! The cart lives server-side keyed by table; the customer page mutates it
//! item by item and checkout turns it into a dine-in order draft.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::cart::{Cart, CartItemInput};
use crate::core::ServerState;
use crate::db::models::{OrderDraft, OrderDraftItem};
use crate::db::repository::MenuItemRepository;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{CustomerType, Order as SharedOrder, OrderType};

/// GET /api/tables/:table/cart - 当前购物车
pub async fn get_cart(
    State(state): State<ServerState>,
    Path(table): Path<String>,
) -> AppResult<Json<Cart>> {
    Ok(Json(state.carts.get(&table)))
}

#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    pub menu_item_id: String,
}

/// POST /api/tables/:table/cart/items - 加一份菜品
///
/// 名称与单价在入车时从菜单快照，用于展示；下单时由生命周期控制器
/// 重新快照并校验总额。
pub async fn add_item(
    State(state): State<ServerState>,
    Path(table): Path<String>,
    Json(req): Json<AddCartItemRequest>,
) -> AppResult<Json<Cart>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&req.menu_item_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", req.menu_item_id)))?;

    if !item.is_available {
        return Err(AppError::validation(format!(
            "Menu item '{}' is not available",
            item.name
        )));
    }

    let input = CartItemInput {
        menu_item_id: item.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
        name: item.name,
        unit_price: item.price,
        image: item.image,
    };
    Ok(Json(state.carts.add_item(&table, input)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    /// Absolute quantity; zero or less removes the entry
    pub quantity: i64,
}

/// PUT /api/tables/:table/cart/items/:menu_item_id - 设置数量
pub async fn update_quantity(
    State(state): State<ServerState>,
    Path((table, menu_item_id)): Path<(String, String)>,
    Json(req): Json<UpdateQuantityRequest>,
) -> AppResult<Json<Cart>> {
    Ok(Json(
        state.carts.update_quantity(&table, &menu_item_id, req.quantity),
    ))
}

/// DELETE /api/tables/:table/cart/items/:menu_item_id - 移除条目
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((table, menu_item_id)): Path<(String, String)>,
) -> AppResult<Json<Cart>> {
    Ok(Json(state.carts.remove_item(&table, &menu_item_id)))
}

/// DELETE /api/tables/:table/cart - 清空购物车
pub async fn clear_cart(
    State(state): State<ServerState>,
    Path(table): Path<String>,
) -> AppResult<Json<bool>> {
    state.carts.clear(&table);
    Ok(Json(true))
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub customer_name: String,
    #[serde(default)]
    pub customer_type: CustomerType,
    pub user_id: Option<String>,
    pub delivery_note: Option<String>,
}

/// POST /api/tables/:table/cart/checkout - 结账下单
///
/// 将购物车转换为 dine-in 订单草稿并提交给生命周期控制器；
/// 下单成功后购物车被清空。
pub async fn checkout(
    State(state): State<ServerState>,
    Path(table): Path<String>,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<SharedOrder>> {
    validate_required_text(&req.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_optional_text(&req.delivery_note, "delivery_note", MAX_NOTE_LEN)?;

    let cart = state.carts.get(&table);
    if cart.is_empty() {
        return Err(AppError::validation("Cart is empty"));
    }

    let draft = OrderDraft {
        customer_name: req.customer_name,
        customer_type: req.customer_type,
        user_id: req.user_id,
        order_type: OrderType::DineIn,
        apartment: None,
        flat_no: None,
        address: None,
        table_no: Some(table.clone()),
        delivery_note: req.delivery_note,
        items: cart
            .entries()
            .iter()
            .map(|e| OrderDraftItem {
                menu_item_id: e.menu_item_id.clone(),
                quantity: e.quantity,
                special_request: None,
            })
            .collect(),
        total_amount: cart.total_amount(),
        payment_method: None,
        staff_name: None,
    };

    let order: SharedOrder = state.lifecycle().create_order(draft).await?.into();

    // 下单成功才清空
    state.carts.clear(&table);
    state.broadcast_sync("orders", "created", &order.id, Some(&order));

    Ok(Json(order))
}
