//! ModelProvider trait — the abstraction over the generative-language API.
//!
//! A provider is treated as an opaque capability: given a fully assembled
//! prompt string and a sampling configuration, return a reply string or fail
//! with a provider error. This is the only non-deterministic, I/O-bound
//! dependency in the request pipeline, and the only suspension point.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Sampling configuration for a provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Temperature (0.0 = deterministic, higher = more creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_output_tokens: None,
        }
    }
}

/// The model capability trait.
///
/// The reply orchestrator calls `generate()` without knowing which backend
/// is in use; tests substitute a mock. Implementations live in the
/// `talkio-providers` crate.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a prompt and get the generated reply text.
    async fn generate(
        &self,
        prompt: &str,
        sampling: &SamplingConfig,
    ) -> std::result::Result<String, ProviderError>;
}
