//! Repository Module
//!
//! Row-level CRUD over the SQLite store. Every query is scoped by
//! restaurant id; no repository opens a multi-table transaction beyond
//! the single insert batch of a generated prep list.

// Reference data
pub mod ingredient;
pub mod menu_item;
pub mod recipe;
pub mod restaurant;

// Demand signals
pub mod pos_sale;
pub mod reservation;

// Prep domain
pub mod confidence;
pub mod prep_list;

// Re-exports
pub use confidence::ConfidenceRepository;
pub use ingredient::IngredientRepository;
pub use menu_item::MenuItemRepository;
pub use pos_sale::PosSaleRepository;
pub use prep_list::PrepListRepository;
pub use recipe::{RecipeLine, RecipeRepository};
pub use reservation::ReservationRepository;
pub use restaurant::RestaurantRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
