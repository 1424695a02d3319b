//! LLM integration via REST API (no SDK dependency)
//!
//! The prep pipeline talks to a [`GenerationProvider`] trait object so
//! the concrete Anthropic client can be swapped for a mock in tests.

mod anthropic;
mod extract;
mod provider;

pub use anthropic::AnthropicProvider;
pub use extract::extract_json_object;
pub use provider::{GenerationProvider, ProviderError};
