use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider response unusable: {0}")]
    Malformed(String),
}

/// Text-generation backend for the prep enrichment stage.
///
/// Takes a system prompt and a user prompt, returns the raw completion
/// text. Callers own prompt construction and response parsing.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, system: &str, user: &str) -> Result<String, ProviderError>;
}
