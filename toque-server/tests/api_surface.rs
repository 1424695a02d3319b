//! HTTP surface checks against the real router with an in-memory
//! database: scoping, CRUD round trips and the food cost report.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use toque_server::core::{Config, ServerState};
use toque_server::db::DbService;
use toque_server::db::repository::{
    IngredientRepository, MenuItemRepository, RestaurantRepository,
};

async fn test_app() -> (Router, String) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let db = DbService::from_pool(pool.clone()).await.unwrap();
    let restaurant = RestaurantRepository::new(pool)
        .create("Chez Margot")
        .await
        .unwrap();

    let state = ServerState::with_services(Config::default(), db, None);
    let app = toque_server::api::router().with_state(state);
    (app, restaurant.id)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn scoped(rid: &str, method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-restaurant-id", rid);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn health_does_not_require_scope() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "ok");
    assert_eq!(json["ai_enabled"], false);
}

#[tokio::test]
async fn missing_restaurant_scope_is_unauthorized() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(Request::get("/api/ingredients").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "E3001");
}

#[tokio::test]
async fn ingredient_crud_round_trip() {
    let (app, rid) = test_app().await;

    let created = app
        .clone()
        .oneshot(scoped(
            &rid,
            "POST",
            "/api/ingredients",
            Some(serde_json::json!({"name": "Beurre", "unit_cost": 12.5, "unit": "kg"})),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::OK);
    let created = body_json(created).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "Beurre");

    let listed = app
        .clone()
        .oneshot(scoped(&rid, "GET", "/api/ingredients", None))
        .await
        .unwrap();
    let listed = body_json(listed).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let updated = app
        .clone()
        .oneshot(scoped(
            &rid,
            "PUT",
            &format!("/api/ingredients/{id}"),
            Some(serde_json::json!({"name": "Beurre doux", "unit_cost": 13.0, "unit": "kg"})),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["name"], "Beurre doux");

    let deleted = app
        .clone()
        .oneshot(scoped(&rid, "DELETE", &format!("/api/ingredients/{id}"), None))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);

    let gone = app
        .oneshot(scoped(&rid, "GET", &format!("/api/ingredients/{id}"), None))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(gone).await["code"], "E0003");
}

#[tokio::test]
async fn ingredient_validation_rejects_negative_cost() {
    let (app, rid) = test_app().await;

    let response = app
        .oneshot(scoped(
            &rid,
            "POST",
            "/api/ingredients",
            Some(serde_json::json!({"name": "Sel", "unit_cost": -1.0, "unit": "kg"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "E0002");
}

#[tokio::test]
async fn food_cost_report_flags_margin_status() {
    let (app, rid) = test_app().await;

    // Menu item at 18.00 with 4.50 of ingredients: margin 75, healthy
    let item = body_json(
        app.clone()
            .oneshot(scoped(
                &rid,
                "POST",
                "/api/menu-items",
                Some(serde_json::json!({"name": "Velouté", "price": 18.0})),
            ))
            .await
            .unwrap(),
    )
    .await;
    let ingredient = body_json(
        app.clone()
            .oneshot(scoped(
                &rid,
                "POST",
                "/api/ingredients",
                Some(serde_json::json!({"name": "Potimarron", "unit_cost": 9.0, "unit": "kg"})),
            ))
            .await
            .unwrap(),
    )
    .await;
    let created = app
        .clone()
        .oneshot(scoped(
            &rid,
            "POST",
            "/api/recipes",
            Some(serde_json::json!({
                "menu_item_id": item["id"],
                "lines": [{"ingredient_id": ingredient["id"], "quantity": 0.5, "unit": "kg"}],
            })),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::OK);

    let report = app
        .clone()
        .oneshot(scoped(&rid, "GET", "/api/food-cost", None))
        .await
        .unwrap();
    assert_eq!(report.status(), StatusCode::OK);
    let report = body_json(report).await;

    let items = report["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["ingredientCost"], 4.5);
    assert_eq!(items[0]["margin"], 75.0);
    assert_eq!(items[0]["status"], "healthy");
    assert_eq!(report["summary"]["healthyItems"], 1);
    assert_eq!(report["summary"]["criticalItems"], 0);

    // A second recipe for the same item is a conflict
    let duplicate = app
        .oneshot(scoped(
            &rid,
            "POST",
            "/api/recipes",
            Some(serde_json::json!({
                "menu_item_id": item["id"],
                "lines": [{"ingredient_id": ingredient["id"], "quantity": 1.0, "unit": "kg"}],
            })),
        ))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn recipe_rejects_cross_tenant_references() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let db = DbService::from_pool(pool.clone()).await.unwrap();
    let restaurants = RestaurantRepository::new(pool.clone());
    let mine = restaurants.create("Chez Margot").await.unwrap();
    let other = restaurants.create("La Concurrence").await.unwrap();

    let item = MenuItemRepository::new(pool.clone())
        .create(&mine.id, "Magret de canard", 26.0, true)
        .await
        .unwrap();
    let foreign = IngredientRepository::new(pool)
        .create(&other.id, "Truffe", 900.0, "kg")
        .await
        .unwrap();

    let state = ServerState::with_services(Config::default(), db, None);
    let app = toque_server::api::router().with_state(state);

    // A line pointing at another restaurant's ingredient is rejected
    let response = app
        .clone()
        .oneshot(scoped(
            &mine.id,
            "POST",
            "/api/recipes",
            Some(serde_json::json!({
                "menu_item_id": item.id,
                "lines": [{"ingredient_id": foreign.id, "quantity": 0.02, "unit": "kg"}],
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "E0002");

    // A menu item the caller does not own reads as absent
    let response = app
        .oneshot(scoped(
            &other.id,
            "POST",
            "/api/recipes",
            Some(serde_json::json!({
                "menu_item_id": item.id,
                "lines": [{"ingredient_id": foreign.id, "quantity": 0.02, "unit": "kg"}],
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tenants_cannot_see_each_other() {
    let (app, rid) = test_app().await;

    app.clone()
        .oneshot(scoped(
            &rid,
            "POST",
            "/api/ingredients",
            Some(serde_json::json!({"name": "Truffe", "unit_cost": 900.0, "unit": "kg"})),
        ))
        .await
        .unwrap();

    let other = app
        .oneshot(scoped("autre-resto", "GET", "/api/ingredients", None))
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::OK);
    assert!(body_json(other).await.as_array().unwrap().is_empty());
}
