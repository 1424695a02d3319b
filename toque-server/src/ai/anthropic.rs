use async_trait::async_trait;
use serde_json::json;

use crate::core::AiConfig;

use super::{GenerationProvider, ProviderError};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Messages API client
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicProvider {
    pub fn new(config: &AiConfig, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }
}

#[async_trait]
impl GenerationProvider for AnthropicProvider {
    async fn generate(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let resp = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&json!({
                "model": self.model,
                "max_tokens": self.max_tokens,
                "temperature": 0.2,
                "system": system,
                "messages": [{ "role": "user", "content": user }],
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: serde_json::Value = resp.json().await?;
        payload["content"][0]["text"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| ProviderError::Malformed(format!("no text content in {payload}")))
    }
}
