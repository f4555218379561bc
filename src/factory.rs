//! Provider construction from resolved configuration.

use std::sync::Arc;

use reforge_config::{LLMConfig, ProviderKind};
use reforge_protocols::{LLMProvider, ProviderError};
use reforge_provider_anthropic::AnthropicProvider;
use reforge_provider_azure::AzureProvider;
use reforge_provider_ollama::OllamaProvider;
use reforge_provider_openai::OpenAiProvider;

use crate::registry::ProviderRegistry;

/// Build the provider the configuration selects.
///
/// A missing provider block is a configuration error, not a transient
/// failure: it fails here, once, instead of on every `generate` call.
pub fn create_provider(
    config: &LLMConfig,
    registry: &ProviderRegistry,
) -> Result<Arc<dyn LLMProvider>, ProviderError> {
    match config.provider {
        ProviderKind::Ollama => Ok(Arc::new(OllamaProvider::new(
            &config.ollama.base_url,
            &config.ollama.model,
        ))),
        ProviderKind::Openai => {
            let openai = config
                .openai
                .as_ref()
                .ok_or_else(|| ProviderError::MissingConfig("openai".to_string()))?;
            Ok(match &openai.base_url {
                Some(base_url) => Arc::new(OpenAiProvider::with_base_url(
                    &openai.api_key,
                    &openai.model,
                    base_url,
                )),
                None => Arc::new(OpenAiProvider::new(&openai.api_key, &openai.model)),
            })
        }
        ProviderKind::Anthropic => {
            let anthropic = config
                .anthropic
                .as_ref()
                .ok_or_else(|| ProviderError::MissingConfig("anthropic".to_string()))?;
            Ok(match &anthropic.base_url {
                Some(base_url) => Arc::new(AnthropicProvider::with_base_url(
                    &anthropic.api_key,
                    &anthropic.model,
                    base_url,
                )),
                None => Arc::new(AnthropicProvider::new(&anthropic.api_key, &anthropic.model)),
            })
        }
        ProviderKind::Azure => {
            let azure = config
                .azure
                .as_ref()
                .ok_or_else(|| ProviderError::MissingConfig("azure".to_string()))?;
            Ok(Arc::new(AzureProvider::new(
                &azure.api_key,
                &azure.endpoint,
                &azure.deployment,
                &azure.api_version,
            )))
        }
        ProviderKind::Custom => {
            let custom = config
                .custom
                .as_ref()
                .ok_or_else(|| ProviderError::MissingConfig("custom".to_string()))?;
            registry
                .get(&custom.name)
                .ok_or_else(|| ProviderError::NotFound(custom.name.clone()))
        }
    }
}
