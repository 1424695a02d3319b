//! Stage-2 Enrichment
//!
//! Submits the stage-1 list to the generation provider and records its
//! suggested quantities per item. Every failure mode (no provider, timeout, HTTP
//! error, unparseable reply) degrades to the stage-1 numbers; the
//! stored list is never rolled back.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use shared::models::{PrepList, PrepListItem};

use crate::ai::{GenerationProvider, extract_json_object};
use crate::db::repository::PrepListRepository;
use crate::utils::{AppError, AppResult};

/// One suggested quantity, wire-compatible with the dashboard
/// (`quantite`/`raison` are the contract field names)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityPrediction {
    pub id: String,
    pub quantite: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raison: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderReply {
    predictions: Vec<serde_json::Value>,
}

/// Enrichment outcome: stage-1 quantities always, provider suggestions
/// when the call succeeded
#[derive(Debug, Clone, Serialize)]
pub struct EnrichmentResult {
    /// True when the provider reply was applied
    pub enriched: bool,
    pub predictions: Vec<QuantityPrediction>,
}

/// Run stage-2 enrichment for one prep list.
///
/// `context` is free-text operator input ("match de foot ce soir",
/// weather, local events) forwarded verbatim to the provider.
pub async fn enrich_prep_list(
    pool: &SqlitePool,
    provider: Option<&Arc<dyn GenerationProvider>>,
    timeout: Duration,
    restaurant_id: &str,
    prep_list_id: &str,
    context: Option<&str>,
) -> AppResult<EnrichmentResult> {
    let repo = PrepListRepository::new(pool.clone());

    let list = repo
        .find_by_id(restaurant_id, prep_list_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Prep list {prep_list_id}")))?;
    let items = repo.find_items(prep_list_id).await?;
    if items.is_empty() {
        return Err(AppError::invalid("Prep list has no items to enrich"));
    }

    // Stage 1 stands on its own; everything past this point is
    // best-effort
    let stage_one: Vec<QuantityPrediction> = items
        .iter()
        .map(|i| QuantityPrediction {
            id: i.id.clone(),
            quantite: i.predicted_portions,
            raison: None,
        })
        .collect();

    let Some(provider) = provider else {
        tracing::debug!(prep_list_id, "No generation provider, keeping stage-1 quantities");
        return Ok(EnrichmentResult {
            enriched: false,
            predictions: stage_one,
        });
    };

    let (system, user) = build_prompts(&list, &items, context);

    let reply = match tokio::time::timeout(timeout, provider.generate(&system, &user)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            tracing::warn!(prep_list_id, error = %e, "Provider call failed, keeping stage-1 quantities");
            return Ok(EnrichmentResult {
                enriched: false,
                predictions: stage_one,
            });
        }
        Err(_) => {
            tracing::warn!(prep_list_id, "Provider call timed out, keeping stage-1 quantities");
            return Ok(EnrichmentResult {
                enriched: false,
                predictions: stage_one,
            });
        }
    };

    let Some(parsed) = parse_predictions(&reply) else {
        tracing::warn!(prep_list_id, "Unparseable provider reply, keeping stage-1 quantities");
        return Ok(EnrichmentResult {
            enriched: false,
            predictions: stage_one,
        });
    };

    // Persist suggestion per item; a bad triple is skipped, not fatal
    let mut applied = Vec::new();
    for prediction in parsed {
        if !items.iter().any(|i| i.id == prediction.id) {
            tracing::debug!(id = %prediction.id, "Suggestion for unknown item skipped");
            continue;
        }
        if let Err(e) = repo
            .update_item_suggestion(&prediction.id, prediction.quantite, prediction.raison.as_deref())
            .await
        {
            tracing::warn!(id = %prediction.id, error = %e, "Suggestion write failed, item skipped");
            continue;
        }
        applied.push(prediction);
    }

    if applied.is_empty() {
        return Ok(EnrichmentResult {
            enriched: false,
            predictions: stage_one,
        });
    }

    tracing::info!(prep_list_id, suggestions = applied.len(), "Prep list enriched");
    Ok(EnrichmentResult {
        enriched: true,
        predictions: applied,
    })
}

fn build_prompts(
    list: &PrepList,
    items: &[PrepListItem],
    context: Option<&str>,
) -> (String, String) {
    let system = "Tu es un Sous-Chef Exécutif expert en prédiction de production (Food Prep).\n\
Ton objectif est d'analyser une liste de préparation standard et d'ajuster les quantités en fonction du contexte.\n\
Tu dois retourner un objet JSON structuré avec l'id de l'item, la quantité suggérée (int), et un raisonnement très court de 15 mots max (ex: \"Augmenté via météo\").\n\n\
IMPORTANT: Ne réponds rien d'autre que du JSON valide, commençant avec { \"predictions\": [...] }."
        .to_string();

    let items_context: Vec<serde_json::Value> = items
        .iter()
        .map(|i| {
            serde_json::json!({
                "id": i.id,
                "name": i.menu_item_name,
                "base_prediction": i.predicted_portions,
                "priority": i.priority,
                "historical_confidence": i.confidence_modifier,
            })
        })
        .collect();

    let user = format!(
        "Date de prep: {}\nService: {}\nCouverts attendus: {}\nContexte additionnel: {}\n\n\
Voici les items à préparer (avec leur base statique calculée):\n{}\n\n\
Produis le JSON pour ajuster ces quantités.",
        list.target_date,
        list.service_period.as_str(),
        list.estimated_covers,
        context.unwrap_or("Journée classique"),
        serde_json::to_string_pretty(&items_context).unwrap_or_default(),
    );

    (system, user)
}

/// Parse the provider reply into usable triples, dropping any entry
/// missing an id or quantity
fn parse_predictions(reply: &str) -> Option<Vec<QuantityPrediction>> {
    let object = extract_json_object(reply)?;
    let parsed: ProviderReply = serde_json::from_str(object).ok()?;

    let usable: Vec<QuantityPrediction> = parsed
        .predictions
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();
    Some(usable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fenced_reply_and_skips_bad_triples() {
        let reply = r#"Voici :
```json
{"predictions": [
  {"id": "a", "quantite": 12, "raison": "Augmenté via météo"},
  {"id": "b"},
  {"quantite": 5},
  {"id": "c", "quantite": 8}
]}
```"#;
        let parsed = parse_predictions(reply).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].id, "a");
        assert_eq!(parsed[0].quantite, 12);
        assert_eq!(parsed[0].raison.as_deref(), Some("Augmenté via météo"));
        assert_eq!(parsed[1].id, "c");
        assert!(parsed[1].raison.is_none());
    }

    #[test]
    fn unparseable_reply_yields_none() {
        assert!(parse_predictions("désolé, pas de JSON").is_none());
        assert!(parse_predictions(r#"{"autre": true}"#).is_none());
    }
}
