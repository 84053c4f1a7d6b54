//! Fixed table of provider adapters.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::anthropic::AnthropicAdapter;
use super::error::DispatchError;
use super::gemini::GeminiAdapter;
use super::ollama::OllamaAdapter;
use super::openai::OpenAIAdapter;
use super::provider::{ProviderAdapter, ProviderId};
use crate::config::ProvidersConfig;

/// Registry of provider adapters, keyed by provider identifier.
///
/// Built once at startup and shared read-only across requests.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    adapters: HashMap<ProviderId, Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every supported provider with endpoints from config.
    pub fn from_config(config: &ProvidersConfig) -> Self {
        let mut registry = Self::new();

        registry.register(
            ProviderId::OpenAI,
            Arc::new(OpenAIAdapter::new(&config.openai_base_url)),
        );

        let anthropic: Arc<dyn ProviderAdapter> =
            Arc::new(AnthropicAdapter::new(&config.anthropic_base_url));
        registry.register(ProviderId::Anthropic, anthropic.clone());
        registry.register(ProviderId::Claude, anthropic);

        registry.register(
            ProviderId::Gemini,
            Arc::new(GeminiAdapter::new(&config.gemini_base_url)),
        );
        registry.register(
            ProviderId::Ollama,
            Arc::new(OllamaAdapter::local(&config.ollama_url)),
        );
        registry.register(
            ProviderId::OllamaCloud,
            Arc::new(OllamaAdapter::cloud(&config.ollama_cloud_url)),
        );

        debug!(count = registry.adapters.len(), "Registered provider adapters");
        registry
    }

    /// Register an adapter implementation.
    pub fn register(&mut self, provider: ProviderId, adapter: Arc<dyn ProviderAdapter>) {
        self.adapters.insert(provider, adapter);
    }

    /// Get an adapter by provider identifier.
    pub fn get(&self, provider: ProviderId) -> Option<Arc<dyn ProviderAdapter>> {
        self.adapters.get(&provider).cloned()
    }

    /// Get an adapter, failing with `UnsupportedProvider` when none is registered.
    pub fn resolve(&self, provider: ProviderId) -> Result<Arc<dyn ProviderAdapter>, DispatchError> {
        self.get(provider)
            .ok_or_else(|| DispatchError::UnsupportedProvider(provider.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_provider_is_registered() {
        let registry = ProviderRegistry::from_config(&ProvidersConfig::default());
        for id in ProviderId::ALL {
            assert!(registry.get(id).is_some(), "{id} missing");
        }
    }

    #[test]
    fn claude_and_anthropic_share_one_adapter() {
        let registry = ProviderRegistry::from_config(&ProvidersConfig::default());
        let anthropic = registry.get(ProviderId::Anthropic).unwrap();
        let claude = registry.get(ProviderId::Claude).unwrap();
        assert!(Arc::ptr_eq(&anthropic, &claude));
        assert_eq!(claude.name(), "Anthropic");
    }

    #[test]
    fn empty_registry_resolves_to_unsupported() {
        let err = ProviderRegistry::new()
            .resolve(ProviderId::Gemini)
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Unsupported provider: gemini");
    }
}
