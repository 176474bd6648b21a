//! Provider implementations for Talkio.
//!
//! All providers implement the `talkio_core::ModelProvider` trait. The
//! default (and currently only) backend is Google's Generative Language API.

pub mod gemini;

pub use gemini::GeminiProvider;

use std::sync::Arc;

use talkio_core::{Error, ModelProvider};

/// Build the provider from configuration.
///
/// Fails with [`Error::MissingCredential`] when no API key is configured,
/// before any request is accepted.
pub fn build_from_config(config: &talkio_config::AppConfig) -> Result<Arc<dyn ModelProvider>, Error> {
    let api_key = config
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| Error::MissingCredential("GEMINI_API_KEY".into()))?;

    let mut provider = GeminiProvider::new(api_key, &config.model);
    if let Some(ref url) = config.api_url {
        provider = provider.with_base_url(url);
    }
    Ok(Arc::new(provider))
}
