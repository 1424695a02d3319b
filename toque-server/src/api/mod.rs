//! API Route Modules
//!
//! One module per resource, each exposing a `router()` nested under its
//! own `/api/...` prefix:
//!
//! - [`health`] - liveness and database check
//! - [`ingredients`] - ingredient catalog CRUD
//! - [`recipes`] - recipe CRUD (head + ordered lines)
//! - [`menu_items`] - menu item CRUD
//! - [`food_cost`] - margin report over the whole menu
//! - [`prep_lists`] - list generation, AI enrichment, chef feedback

pub mod food_cost;
pub mod health;
pub mod ingredients;
pub mod menu_items;
pub mod prep_lists;
pub mod recipes;

use axum::Router;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    health::router()
        .merge(ingredients::router())
        .merge(recipes::router())
        .merge(menu_items::router())
        .merge(food_cost::router())
        .merge(prep_lists::router())
}
