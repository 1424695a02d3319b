//! Recipe API Handlers
//!
//! Updates replace the whole line set; there is no per-line endpoint.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::models::RecipeFull;

use crate::auth::RestaurantScope;
use crate::core::ServerState;
use crate::db::repository::{
    IngredientRepository, MenuItemRepository, RecipeLine, RecipeRepository,
};
use crate::utils::{AppError, AppResult};

// Serialize is needed for validator's nested error parameters
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RecipeLinePayload {
    #[validate(length(min = 1))]
    pub ingredient_id: String,
    /// Per-portion quantity
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    #[validate(length(max = 20))]
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecipePayload {
    #[validate(length(min = 1))]
    pub menu_item_id: String,
    #[validate(nested, length(min = 1))]
    pub lines: Vec<RecipeLinePayload>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecipePayload {
    #[validate(nested, length(min = 1))]
    pub lines: Vec<RecipeLinePayload>,
}

/// Every referenced ingredient must belong to the caller's restaurant;
/// the foreign key only guarantees global existence.
async fn ensure_lines_owned(
    state: &ServerState,
    restaurant_id: &str,
    lines: &[RecipeLinePayload],
) -> AppResult<()> {
    let ingredients = IngredientRepository::new(state.pool().clone());
    for line in lines {
        if ingredients
            .find_by_id(restaurant_id, &line.ingredient_id)
            .await?
            .is_none()
        {
            return Err(AppError::validation(format!(
                "Ingredient {} does not belong to this restaurant",
                line.ingredient_id
            )));
        }
    }
    Ok(())
}

fn to_lines(payload: &[RecipeLinePayload]) -> Vec<RecipeLine> {
    payload
        .iter()
        .map(|l| RecipeLine {
            ingredient_id: l.ingredient_id.clone(),
            quantity: l.quantity,
            unit: l.unit.clone(),
        })
        .collect()
}

/// GET /api/recipes
pub async fn list(
    State(state): State<ServerState>,
    scope: RestaurantScope,
) -> AppResult<Json<Vec<RecipeFull>>> {
    let repo = RecipeRepository::new(state.pool().clone());
    Ok(Json(repo.find_all_full(scope.id()).await?))
}

/// GET /api/recipes/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    scope: RestaurantScope,
    Path(id): Path<String>,
) -> AppResult<Json<RecipeFull>> {
    let repo = RecipeRepository::new(state.pool().clone());
    let recipe = repo
        .find_by_id_full(scope.id(), &id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;
    Ok(Json(recipe))
}

/// POST /api/recipes
pub async fn create(
    State(state): State<ServerState>,
    scope: RestaurantScope,
    Json(payload): Json<CreateRecipePayload>,
) -> AppResult<Json<RecipeFull>> {
    payload.validate()?;
    MenuItemRepository::new(state.pool().clone())
        .find_by_id(scope.id(), &payload.menu_item_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {}", payload.menu_item_id)))?;
    ensure_lines_owned(&state, scope.id(), &payload.lines).await?;

    let repo = RecipeRepository::new(state.pool().clone());
    let recipe = repo
        .create(scope.id(), &payload.menu_item_id, &to_lines(&payload.lines))
        .await?;
    Ok(Json(recipe))
}

/// PUT /api/recipes/:id
pub async fn update(
    State(state): State<ServerState>,
    scope: RestaurantScope,
    Path(id): Path<String>,
    Json(payload): Json<UpdateRecipePayload>,
) -> AppResult<Json<RecipeFull>> {
    payload.validate()?;
    ensure_lines_owned(&state, scope.id(), &payload.lines).await?;

    let repo = RecipeRepository::new(state.pool().clone());
    let recipe = repo
        .replace_lines(scope.id(), &id, &to_lines(&payload.lines))
        .await?;
    Ok(Json(recipe))
}

/// DELETE /api/recipes/:id
pub async fn delete(
    State(state): State<ServerState>,
    scope: RestaurantScope,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = RecipeRepository::new(state.pool().clone());
    Ok(Json(repo.delete(scope.id(), &id).await?))
}
