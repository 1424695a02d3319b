//! Recipe Repository
//!
//! Recipes are stored as a head row plus ordered ingredient lines;
//! updates replace the whole line set.

use super::{RepoError, RepoResult};
use shared::models::{Recipe, RecipeFull, RecipeIngredient};
use shared::util::new_id;
use sqlx::SqlitePool;
use std::collections::HashMap;

/// One line of a create/update payload, already validated by the caller
#[derive(Debug, Clone)]
pub struct RecipeLine {
    pub ingredient_id: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Clone)]
pub struct RecipeRepository {
    pool: SqlitePool,
}

impl RecipeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All recipes of one restaurant with their lines joined in
    pub async fn find_all_full(&self, restaurant_id: &str) -> RepoResult<Vec<RecipeFull>> {
        let recipes = sqlx::query_as::<_, Recipe>(
            "SELECT * FROM recipes WHERE restaurant_id = ?",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        let lines = sqlx::query_as::<_, RecipeIngredient>(
            "SELECT ri.* FROM recipe_ingredients ri \
             JOIN recipes r ON ri.recipe_id = r.id \
             WHERE r.restaurant_id = ? \
             ORDER BY ri.sort_order",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        let mut by_recipe: HashMap<String, Vec<RecipeIngredient>> = HashMap::new();
        for line in lines {
            by_recipe.entry(line.recipe_id.clone()).or_default().push(line);
        }

        Ok(recipes
            .into_iter()
            .map(|r| {
                let lines = by_recipe.remove(&r.id).unwrap_or_default();
                RecipeFull::new(r, lines)
            })
            .collect())
    }

    pub async fn find_by_id_full(
        &self,
        restaurant_id: &str,
        id: &str,
    ) -> RepoResult<Option<RecipeFull>> {
        let recipe = sqlx::query_as::<_, Recipe>(
            "SELECT * FROM recipes WHERE id = ? AND restaurant_id = ?",
        )
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(recipe) = recipe else {
            return Ok(None);
        };

        let lines = self.find_lines(&recipe.id).await?;
        Ok(Some(RecipeFull::new(recipe, lines)))
    }

    async fn find_lines(&self, recipe_id: &str) -> RepoResult<Vec<RecipeIngredient>> {
        let lines = sqlx::query_as::<_, RecipeIngredient>(
            "SELECT * FROM recipe_ingredients WHERE recipe_id = ? ORDER BY sort_order",
        )
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lines)
    }

    /// Create a recipe for a menu item. One recipe per item.
    pub async fn create(
        &self,
        restaurant_id: &str,
        menu_item_id: &str,
        lines: &[RecipeLine],
    ) -> RepoResult<RecipeFull> {
        if lines.is_empty() {
            return Err(RepoError::Validation("recipe needs at least one line".into()));
        }

        let existing = sqlx::query_as::<_, Recipe>(
            "SELECT * FROM recipes WHERE menu_item_id = ? AND restaurant_id = ?",
        )
        .bind(menu_item_id)
        .bind(restaurant_id)
        .fetch_optional(&self.pool)
        .await?;
        if existing.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Recipe for menu item {menu_item_id} already exists"
            )));
        }

        let recipe = Recipe {
            id: new_id(),
            restaurant_id: restaurant_id.to_string(),
            menu_item_id: menu_item_id.to_string(),
        };
        sqlx::query("INSERT INTO recipes (id, restaurant_id, menu_item_id) VALUES (?, ?, ?)")
            .bind(&recipe.id)
            .bind(&recipe.restaurant_id)
            .bind(&recipe.menu_item_id)
            .execute(&self.pool)
            .await?;

        self.insert_lines(&recipe.id, lines).await?;
        let lines = self.find_lines(&recipe.id).await?;
        Ok(RecipeFull::new(recipe, lines))
    }

    /// Replace the line set of an existing recipe
    pub async fn replace_lines(
        &self,
        restaurant_id: &str,
        id: &str,
        lines: &[RecipeLine],
    ) -> RepoResult<RecipeFull> {
        let recipe = sqlx::query_as::<_, Recipe>(
            "SELECT * FROM recipes WHERE id = ? AND restaurant_id = ?",
        )
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Recipe {id} not found")))?;

        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ?")
            .bind(&recipe.id)
            .execute(&self.pool)
            .await?;

        self.insert_lines(&recipe.id, lines).await?;
        let lines = self.find_lines(&recipe.id).await?;
        Ok(RecipeFull::new(recipe, lines))
    }

    async fn insert_lines(&self, recipe_id: &str, lines: &[RecipeLine]) -> RepoResult<()> {
        for (index, line) in lines.iter().enumerate() {
            sqlx::query(
                "INSERT INTO recipe_ingredients \
                 (id, recipe_id, ingredient_id, quantity, unit, sort_order) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(new_id())
            .bind(recipe_id)
            .bind(&line.ingredient_id)
            .bind(line.quantity)
            .bind(&line.unit)
            .bind(index as i64)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    pub async fn delete(&self, restaurant_id: &str, id: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = ? AND restaurant_id = ?")
            .bind(id)
            .bind(restaurant_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
