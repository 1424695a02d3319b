//! Ingredient API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use validator::Validate;

use shared::models::Ingredient;

use crate::auth::RestaurantScope;
use crate::core::ServerState;
use crate::db::repository::IngredientRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize, Validate)]
pub struct IngredientPayload {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Cost per unit, in the restaurant's currency
    #[validate(range(min = 0.0))]
    pub unit_cost: f64,
    /// kg, L, pièce...
    #[validate(length(min = 1, max = 20))]
    pub unit: String,
}

/// GET /api/ingredients
pub async fn list(
    State(state): State<ServerState>,
    scope: RestaurantScope,
) -> AppResult<Json<Vec<Ingredient>>> {
    let repo = IngredientRepository::new(state.pool().clone());
    Ok(Json(repo.find_all(scope.id()).await?))
}

/// GET /api/ingredients/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    scope: RestaurantScope,
    Path(id): Path<String>,
) -> AppResult<Json<Ingredient>> {
    let repo = IngredientRepository::new(state.pool().clone());
    let ingredient = repo
        .find_by_id(scope.id(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Ingredient {id}")))?;
    Ok(Json(ingredient))
}

/// POST /api/ingredients
pub async fn create(
    State(state): State<ServerState>,
    scope: RestaurantScope,
    Json(payload): Json<IngredientPayload>,
) -> AppResult<Json<Ingredient>> {
    payload.validate()?;
    let repo = IngredientRepository::new(state.pool().clone());
    let ingredient = repo
        .create(scope.id(), &payload.name, payload.unit_cost, &payload.unit)
        .await?;
    Ok(Json(ingredient))
}

/// PUT /api/ingredients/:id
pub async fn update(
    State(state): State<ServerState>,
    scope: RestaurantScope,
    Path(id): Path<String>,
    Json(payload): Json<IngredientPayload>,
) -> AppResult<Json<Ingredient>> {
    payload.validate()?;
    let repo = IngredientRepository::new(state.pool().clone());
    let ingredient = repo
        .update(scope.id(), &id, &payload.name, payload.unit_cost, &payload.unit)
        .await?;
    Ok(Json(ingredient))
}

/// DELETE /api/ingredients/:id
pub async fn delete(
    State(state): State<ServerState>,
    scope: RestaurantScope,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = IngredientRepository::new(state.pool().clone());
    Ok(Json(repo.delete(scope.id(), &id).await?))
}
