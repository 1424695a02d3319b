//! Server configuration
//!
//! Every field can be overridden through an environment variable:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | ./data | Working directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | DATABASE_PATH | {WORK_DIR}/toque.db | SQLite database file |
//! | ENVIRONMENT | development | development / staging / production |
//! | AI_API_KEY | (unset) | Generation provider key; stage 2 disabled when absent |
//! | AI_BASE_URL | https://api.anthropic.com | Provider endpoint |
//! | AI_MODEL | claude-3-7-sonnet-latest | Model identifier |
//! | AI_TIMEOUT_MS | 30000 | Upper bound for one provider call |
//! | AI_MAX_TOKENS | 2000 | Completion budget per call |

/// Generation provider configuration.
///
/// Passed explicitly into the AI client so the prediction engine stays
/// testable without environment setup.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// None disables stage-2 enrichment entirely
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_ms: u64,
    pub max_tokens: u32,
}

impl AiConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("AI_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: std::env::var("AI_BASE_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com".into()),
            model: std::env::var("AI_MODEL")
                .unwrap_or_else(|_| "claude-3-7-sonnet-latest".into()),
            timeout_ms: std::env::var("AI_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30000),
            max_tokens: std::env::var("AI_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2000),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// development | staging | production
    pub environment: String,
    /// Generation provider settings
    pub ai: AiConfig,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| format!("{work_dir}/toque.db"));

        Self {
            work_dir,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            ai: AiConfig::from_env(),
        }
    }

    /// Override work dir, port and database path, typically for tests
    pub fn with_overrides(
        work_dir: impl Into<String>,
        http_port: u16,
        database_path: impl Into<String>,
    ) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.database_path = database_path.into();
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
