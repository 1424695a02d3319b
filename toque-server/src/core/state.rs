//! Server state
//!
//! [`ServerState`] holds shared handles for everything a request handler
//! needs: configuration, the database pool and the optional generation
//! provider. Cloning is shallow (Arc/pool clones).

use std::sync::Arc;

use crate::ai::{AnthropicProvider, GenerationProvider};
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppResult;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration (immutable after startup)
    pub config: Config,
    /// Database service (SQLite pool)
    pub db: DbService,
    /// External generation provider; None when unconfigured, in which
    /// case prep generation degrades to stage-1-only results
    pub generation: Option<Arc<dyn GenerationProvider>>,
}

impl ServerState {
    /// Initialize all services from configuration
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path).await?;

        let generation: Option<Arc<dyn GenerationProvider>> = match &config.ai.api_key {
            Some(key) => Some(Arc::new(AnthropicProvider::new(&config.ai, key.clone()))),
            None => {
                tracing::warn!("AI_API_KEY not set, prep enrichment disabled (stage 1 only)");
                None
            }
        };

        Ok(Self {
            config: config.clone(),
            db,
            generation,
        })
    }

    /// Build a state over an existing pool, with a caller-chosen
    /// provider. Used by tests.
    pub fn with_services(
        config: Config,
        db: DbService,
        generation: Option<Arc<dyn GenerationProvider>>,
    ) -> Self {
        Self {
            config,
            db,
            generation,
        }
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.db.pool
    }
}
