//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{MenuItemCreate, MenuItemUpdate};
use crate::db::repository::MenuItemRepository;
use crate::utils::{AppError, AppResult};
use shared::models::MenuItem as SharedMenuItem;

const RESOURCE: &str = "menu_item";

/// Query params for the menu listing
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    /// Restrict to one category
    pub category: Option<String>,
}

/// GET /api/menu - 获取菜单 (可按分类过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<Vec<SharedMenuItem>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let items = match query.category {
        Some(category) => repo.find_by_category(&category).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(items.into_iter().map(|m| m.into()).collect()))
}

/// GET /api/menu/:id - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SharedMenuItem>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    Ok(Json(item.into()))
}

/// POST /api/menu - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<SharedMenuItem>> {
    payload.validate()?;
    let repo = MenuItemRepository::new(state.db.clone());
    let item: SharedMenuItem = repo.create(payload).await?.into();

    // 广播同步通知
    state.broadcast_sync(RESOURCE, "created", &item.id, Some(&item));

    Ok(Json(item))
}

/// PUT /api/menu/:id - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<SharedMenuItem>> {
    payload.validate()?;
    let repo = MenuItemRepository::new(state.db.clone());
    let item: SharedMenuItem = repo.update(&id, payload).await?.into();

    // 广播同步通知
    state.broadcast_sync(RESOURCE, "updated", &item.id, Some(&item));

    Ok(Json(item))
}

/// DELETE /api/menu/:id - 删除菜品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    // 广播同步通知
    if result {
        state.broadcast_sync::<()>(RESOURCE, "deleted", &id, None);
    }

    Ok(Json(result))
}
