//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use validator::Validate;

use shared::models::MenuItem;

use crate::auth::RestaurantScope;
use crate::core::ServerState;
use crate::db::repository::MenuItemRepository;
use crate::utils::{AppError, AppResult};

fn default_available() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct MenuItemPayload {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default = "default_available")]
    pub available: bool,
}

/// GET /api/menu-items
pub async fn list(
    State(state): State<ServerState>,
    scope: RestaurantScope,
) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.pool().clone());
    Ok(Json(repo.find_all(scope.id()).await?))
}

/// GET /api/menu-items/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    scope: RestaurantScope,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.pool().clone());
    let item = repo
        .find_by_id(scope.id(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {id}")))?;
    Ok(Json(item))
}

/// POST /api/menu-items
pub async fn create(
    State(state): State<ServerState>,
    scope: RestaurantScope,
    Json(payload): Json<MenuItemPayload>,
) -> AppResult<Json<MenuItem>> {
    payload.validate()?;
    let repo = MenuItemRepository::new(state.pool().clone());
    let item = repo
        .create(scope.id(), &payload.name, payload.price, payload.available)
        .await?;
    Ok(Json(item))
}

/// PUT /api/menu-items/:id
pub async fn update(
    State(state): State<ServerState>,
    scope: RestaurantScope,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemPayload>,
) -> AppResult<Json<MenuItem>> {
    payload.validate()?;
    let repo = MenuItemRepository::new(state.pool().clone());
    let item = repo
        .update(scope.id(), &id, &payload.name, payload.price, payload.available)
        .await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/:id
pub async fn delete(
    State(state): State<ServerState>,
    scope: RestaurantScope,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = MenuItemRepository::new(state.pool().clone());
    Ok(Json(repo.delete(scope.id(), &id).await?))
}
