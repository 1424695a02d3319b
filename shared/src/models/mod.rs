//! Domain Models

// Reference data
pub mod ingredient;
pub mod menu_item;
pub mod recipe;
pub mod restaurant;

// Demand signals
pub mod pos_sale;
pub mod reservation;

// Prep domain
pub mod prep_list;

// Derived results
pub mod food_cost;

// Re-exports
pub use food_cost::{FoodCostReport, FoodCostResult, FoodCostSummary};
pub use ingredient::Ingredient;
pub use menu_item::MenuItem;
pub use pos_sale::PosSale;
pub use prep_list::{ConfidenceModifier, PrepList, PrepListIngredient, PrepListItem};
pub use recipe::{Recipe, RecipeFull, RecipeIngredient};
pub use reservation::Reservation;
pub use restaurant::Restaurant;
