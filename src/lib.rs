//! reforge - LLM post-processing for recorded browser-automation scripts.
//!
//! A deterministic code generator records user actions and emits code
//! fragments; reforge optionally rewrites each fragment, and the assembled
//! script, through an LLM call to improve selector robustness and add
//! fallbacks and assertions. The pipeline caches results per logical action,
//! joins concurrent requests, debounces keystroke-level kinds, and checks a
//! whole-script rewrite structurally before accepting it. Enhancement can
//! never break code generation: every entry point returns its input unchanged
//! on any failure.
//!
//! ```no_run
//! # async fn example() {
//! use reforge::Enhancer;
//!
//! let enhancer = Enhancer::init(None);
//! // ...per action, from the generator:
//! // let code = enhancer.enhance_action(&fragment, &action, &context).await;
//! // ...once recording ends:
//! // let script = enhancer.enhance_complete_script(&full_script).await;
//! # }
//! ```

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

mod factory;
mod registry;

pub use factory::create_provider;
pub use registry::ProviderRegistry;

pub use reforge_config::{
    AnthropicConfig, AzureConfig, ConfigLoader, CustomConfig, EnhancementConfig, LLMConfig,
    OllamaConfig, OpenAiConfig, PromptsConfig, ProviderKind,
};
pub use reforge_pipeline::{keys, extract_code_block, EnhancementSession};
pub use reforge_protocols::{
    Action, ActionContext, Dimensions, GenerateOptions, LLMProvider, Message, MessageRole,
    Position, ProviderError, TargetInfo,
};

/// Facade over the enhancement pipeline, constructed once per recording
/// session. A disabled or misconfigured enhancer passes everything through
/// unchanged.
pub struct Enhancer {
    session: Option<EnhancementSession>,
}

impl Enhancer {
    /// Resolve configuration and build the session. Never fails: a provider
    /// configuration error is logged and yields a disabled enhancer, so the
    /// generator keeps working either way.
    pub fn init(config_path: Option<&Path>) -> Self {
        Self::init_with_registry(config_path, &ProviderRegistry::new())
    }

    /// [`Self::init`] with custom providers available for selection.
    pub fn init_with_registry(config_path: Option<&Path>, registry: &ProviderRegistry) -> Self {
        match Self::try_init(config_path, registry) {
            Ok(enhancer) => enhancer,
            Err(err) => {
                warn!(error = %err, "provider configuration error, disabling enhancement");
                Self::disabled()
            }
        }
    }

    /// Like [`Self::init_with_registry`], but a provider configuration error
    /// (missing block, unregistered custom provider) is propagated so callers
    /// can surface it instead of silently running without enhancement.
    pub fn try_init(
        config_path: Option<&Path>,
        registry: &ProviderRegistry,
    ) -> Result<Self, ProviderError> {
        let config = ConfigLoader::load(config_path);
        if !config.enhancement.enabled {
            info!("AI enhancement is disabled");
            return Ok(Self::disabled());
        }
        let provider = create_provider(&config, registry)?;
        info!(provider = provider.id(), "AI enhancement enabled");
        Ok(Self::from_parts(provider, Arc::new(config)))
    }

    /// An enhancer that passes everything through unchanged.
    pub fn disabled() -> Self {
        Self { session: None }
    }

    /// Explicit construction from an already-built provider and configuration.
    pub fn from_parts(provider: Arc<dyn LLMProvider>, config: Arc<LLMConfig>) -> Self {
        Self {
            session: Some(EnhancementSession::new(provider, config)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.session.as_ref().is_some_and(EnhancementSession::is_enabled)
    }

    /// Enhance one generated fragment. Total; worst case returns `code`.
    pub async fn enhance_action(
        &self,
        code: &str,
        action: &Action,
        context: &ActionContext,
    ) -> String {
        match &self.session {
            Some(session) => session.enhance_action(code, action, context).await,
            None => code.to_string(),
        }
    }

    /// Enhance the assembled script once recording ends. Total; worst case
    /// returns `script`.
    pub async fn enhance_complete_script(&self, script: &str) -> String {
        match &self.session {
            Some(session) => session.enhance_complete_script(script).await,
            None => script.to_string(),
        }
    }

    /// Barrier over all pending per-action work.
    pub async fn wait_for_all_pending(&self) {
        if let Some(session) = &self.session {
            session.wait_for_all_pending().await;
        }
    }

    /// Completed enhancement for an action key, if any. Debounced fill/press
    /// completions are consumed this way.
    pub fn cached_enhancement(&self, key: &str) -> Option<String> {
        self.session.as_ref()?.cached_enhancement(key)
    }
}
