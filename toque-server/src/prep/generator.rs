//! Prep List Generation
//!
//! Builds a list in up to three levels, each one conditional on the
//! data actually present for the restaurant:
//!   1. reservations only: cover estimation
//!   2. + POS history: per-item portion predictions
//!   3. + costed recipes: raw-ingredient aggregation
//! A brand-new restaurant with nothing but reservations still gets a
//! usable level-1 list.

use std::collections::HashMap;

use chrono::Datelike;
use serde::Serialize;
use sqlx::SqlitePool;

use shared::models::{ConfidenceModifier, Ingredient, PrepList, PrepListIngredient, PrepListItem};
use shared::types::{PrepListStatus, ServicePeriod};
use shared::util::{new_id, now_millis};

use crate::db::repository::{
    ConfidenceRepository, IngredientRepository, MenuItemRepository, PosSaleRepository,
    PrepListRepository, RecipeRepository, ReservationRepository,
};
use crate::engine::{
    self, PrepAlert, calculate_item_food_cost, detect_volume_anomalies, estimate_covers,
    reserved_covers_by_date, walk_in_ratio_from_history,
};
use crate::utils::{AppError, AppResult};

/// Extra headroom applied on top of the walk-in gross-up
pub const DEFAULT_SAFETY_BUFFER: f64 = 0.10;
/// History window for the walk-in ratio and item mix (4 weeks)
pub const LOOKBACK_DAYS: i64 = 28;

const DAY_LABELS: [&str; 7] = [
    "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
];

/// Full payload of a fetched or freshly generated list
#[derive(Debug, Clone, Serialize)]
pub struct PrepListView {
    pub list: PrepList,
    pub items: Vec<PrepListItem>,
    pub ingredients: Vec<PrepListIngredient>,
    /// Transient advisories, only present when freshly generated
    pub alerts: Vec<PrepAlert>,
    /// True when this call generated the list
    pub generated: bool,
}

/// Return the existing list for (date, service) or generate a new one.
///
/// Generation is idempotent per (restaurant, date, service): a second
/// call returns the stored list instead of regenerating.
pub async fn fetch_or_generate(
    pool: &SqlitePool,
    restaurant_id: &str,
    target_date: &str,
    service_period: ServicePeriod,
) -> AppResult<PrepListView> {
    let repo = PrepListRepository::new(pool.clone());

    if let Some(list) = repo
        .find_by_date_service(restaurant_id, target_date, service_period)
        .await?
    {
        let items = repo.find_items(&list.id).await?;
        let ingredients = repo.find_ingredients(&list.id).await?;
        return Ok(PrepListView {
            list,
            items,
            ingredients,
            alerts: Vec::new(),
            generated: false,
        });
    }

    generate_prep_list(pool, restaurant_id, target_date, service_period).await
}

/// Generate and persist a prep list for one (date, service) pair
pub async fn generate_prep_list(
    pool: &SqlitePool,
    restaurant_id: &str,
    target_date: &str,
    service_period: ServicePeriod,
) -> AppResult<PrepListView> {
    let date = chrono::NaiveDate::parse_from_str(target_date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid target date: {target_date}")))?;
    let day_of_week = date.weekday().num_days_from_sunday();
    let day_label = DAY_LABELS[day_of_week as usize];
    let since = (date - chrono::Duration::days(LOOKBACK_DAYS)).to_string();

    let reservations = ReservationRepository::new(pool.clone());
    let pos_sales = PosSaleRepository::new(pool.clone());
    let menu_items = MenuItemRepository::new(pool.clone());
    let recipes_repo = RecipeRepository::new(pool.clone());
    let ingredients_repo = IngredientRepository::new(pool.clone());
    let confidence = ConfidenceRepository::new(pool.clone());
    let prep_lists = PrepListRepository::new(pool.clone());

    // Level 1: covers from reservations plus the learned walk-in ratio
    let day_reservations = reservations.find_for_date(restaurant_id, target_date).await?;
    let history = reservations.find_active_since(restaurant_id, &since).await?;

    let mut reserved_by_date = reserved_covers_by_date(&history, day_of_week);
    reserved_by_date.remove(target_date);

    let period_filter = match service_period {
        ServicePeriod::AllDay => None,
        other => Some(other),
    };
    let day_sales = pos_sales
        .find_for_day(restaurant_id, day_of_week as i64, &since, period_filter)
        .await?;

    let mut actual_by_date: HashMap<String, i64> = HashMap::new();
    for sale in &day_sales {
        *actual_by_date.entry(sale.sale_date.clone()).or_insert(0) +=
            sale.quantity_sold_weekly.max(0);
    }

    let walk_in_ratio = walk_in_ratio_from_history(&reserved_by_date, &actual_by_date);
    let estimation = estimate_covers(
        &day_reservations,
        walk_in_ratio,
        DEFAULT_SAFETY_BUFFER,
        service_period,
    );

    let mut generation_level = 1i64;
    let mut items: Vec<PrepListItem> = Vec::new();
    let mut ingredient_lines: Vec<PrepListIngredient> = Vec::new();
    let mut estimated_food_cost = 0.0;

    let prep_list_id = new_id();

    // Level 2: per-item predictions from the POS mix
    let active_items = menu_items.find_available(restaurant_id).await?;
    if !active_items.is_empty() {
        let active_ids: Vec<String> = active_items.iter().map(|i| i.id.clone()).collect();
        let mix = engine::item_mix(&day_sales, &active_ids);
        // Equal-share fallback mixes carry no real signal
        let has_pos_data = !day_sales.is_empty() && engine::has_pos_signal(&mix);
        if has_pos_data {
            generation_level = 2;
        }

        let modifiers: HashMap<String, ConfidenceModifier> = confidence
            .find_all(restaurant_id)
            .await?
            .into_iter()
            .map(|m| (m.menu_item_id.clone(), m))
            .collect();

        let recipes = recipes_repo.find_all_full(restaurant_id).await?;
        let ingredient_map: HashMap<String, Ingredient> = ingredients_repo
            .find_all(restaurant_id)
            .await?
            .into_iter()
            .map(|i| (i.id.clone(), i))
            .collect();
        let unit_costs: HashMap<String, f64> = ingredient_map
            .iter()
            .map(|(id, i)| (id.clone(), i.unit_cost))
            .collect();

        // Margin and popularity medians for the BCG split
        let mut cost_by_item: HashMap<String, (f64, f64)> = HashMap::new();
        for recipe in &recipes {
            let Some(menu_item) = active_items.iter().find(|i| i.id == recipe.menu_item_id)
            else {
                continue;
            };
            let result =
                calculate_item_food_cost(recipe, menu_item.price, &menu_item.name, &unit_costs);
            cost_by_item.insert(
                recipe.menu_item_id.clone(),
                (result.margin, result.ingredient_cost),
            );
        }
        let margins: Vec<f64> = cost_by_item.values().map(|(margin, _)| *margin).collect();
        let median_margin = engine::median_or(&margins, 65.0);

        let mut sales_totals: HashMap<String, i64> = HashMap::new();
        for sale in pos_sales.find_all(restaurant_id).await? {
            *sales_totals.entry(sale.menu_item_id).or_insert(0) +=
                sale.quantity_sold_weekly.max(0);
        }
        let sales_values: Vec<f64> = sales_totals.values().map(|v| *v as f64).collect();
        let median_sales = engine::median_or(&sales_values, 0.0) as i64;

        let mut raw_items: Vec<PrepListItem> = Vec::new();
        let mut margin_by_item: HashMap<String, f64> = HashMap::new();
        for menu_item in &active_items {
            let share = *mix.get(&menu_item.id).unwrap_or(&0.0);
            let modifier_row = modifiers.get(&menu_item.id);
            let confidence_modifier = modifier_row.map(|m| m.modifier).unwrap_or(1.0);
            let feedback_count = modifier_row.map(|m| m.feedback_count).unwrap_or(0);

            let baseline = estimation.estimated_total as f64 * share;
            let predicted_portions = engine::apply_modifier(baseline, confidence_modifier);

            let cost = cost_by_item.get(&menu_item.id);
            let margin_percent = cost.map(|(margin, _)| *margin).unwrap_or(0.0);
            let cost_per_unit = cost.map(|(_, cost)| *cost).unwrap_or(0.0);
            margin_by_item.insert(menu_item.id.clone(), margin_percent);

            let item_sales = *sales_totals.get(&menu_item.id).unwrap_or(&0);
            let bcg =
                engine::classify_bcg(margin_percent, median_margin, item_sales, median_sales);

            raw_items.push(PrepListItem {
                id: new_id(),
                prep_list_id: prep_list_id.clone(),
                menu_item_id: menu_item.id.clone(),
                menu_item_name: menu_item.name.clone(),
                predicted_portions,
                item_share: share,
                priority: shared::types::Priority::Medium,
                priority_score: 50,
                confidence_score: engine::confidence_score(
                    has_pos_data,
                    cost.is_some(),
                    feedback_count,
                ),
                confidence_modifier,
                bcg_category: Some(bcg),
                estimated_cost: engine::round_dp(cost_per_unit * predicted_portions as f64, 2),
                actual_portions: None,
                feedback_delta: None,
                ai_suggestion_quantity: None,
                ai_reasoning: None,
            });
        }

        // Popularity rank from the share ordering, 0 = most popular
        raw_items.sort_by(|a, b| {
            b.item_share
                .partial_cmp(&a.item_share)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let total = raw_items.len();
        for (rank, item) in raw_items.iter_mut().enumerate() {
            let rank_normalized = if total > 1 {
                rank as f64 / (total - 1) as f64
            } else {
                0.0
            };
            let margin = *margin_by_item.get(&item.menu_item_id).unwrap_or(&0.0);
            let (priority, score) =
                engine::calculate_priority(item.bcg_category, margin, rank_normalized);
            item.priority = priority;
            item.priority_score = score;
        }

        items = raw_items
            .into_iter()
            .filter(|i| i.predicted_portions > 0)
            .collect();
        items.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));
        estimated_food_cost =
            engine::round_dp(items.iter().map(|i| i.estimated_cost).sum::<f64>(), 2);

        // Level 3: raw-ingredient aggregation over costed recipes
        if !recipes.is_empty() && !ingredient_map.is_empty() {
            generation_level = 3;
            let plans: Vec<engine::PortionPlan> = items
                .iter()
                .map(|i| engine::PortionPlan {
                    menu_item_id: i.menu_item_id.clone(),
                    predicted_portions: i.predicted_portions,
                })
                .collect();
            ingredient_lines = engine::aggregate_ingredients(&plans, &recipes, &ingredient_map)
                .into_iter()
                .map(|line| PrepListIngredient {
                    id: new_id(),
                    prep_list_id: prep_list_id.clone(),
                    ingredient_id: line.ingredient_id,
                    ingredient_name: line.ingredient_name,
                    total_quantity: line.total_quantity,
                    unit: line.unit,
                    estimated_cost: line.estimated_cost,
                })
                .collect();
        }
    }

    // Volume advisory against the historical average for this weekday
    let historical_avg = if reserved_by_date.is_empty() {
        0.0
    } else {
        reserved_by_date.values().sum::<i64>() as f64 / reserved_by_date.len() as f64
    };
    let alerts = detect_volume_anomalies(estimation.estimated_total, historical_avg, day_label);

    let list = PrepList {
        id: prep_list_id,
        restaurant_id: restaurant_id.to_string(),
        target_date: target_date.to_string(),
        service_period,
        reserved_covers: estimation.reserved_covers,
        estimated_covers: estimation.estimated_total,
        walk_in_ratio: estimation.walk_in_ratio,
        safety_buffer: DEFAULT_SAFETY_BUFFER,
        estimated_food_cost,
        generation_level,
        status: PrepListStatus::Draft,
        created_at: now_millis(),
        completed_at: None,
    };

    prep_lists
        .insert_generated(&list, &items, &ingredient_lines)
        .await?;

    tracing::info!(
        restaurant_id,
        target_date,
        level = generation_level,
        covers = estimation.estimated_total,
        items = items.len(),
        "Prep list generated"
    );

    Ok(PrepListView {
        list,
        items,
        ingredients: ingredient_lines,
        alerts,
        generated: true,
    })
}
