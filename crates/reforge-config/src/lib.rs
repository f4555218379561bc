//! Configuration resolution for the reforge enhancement pipeline.
//!
//! Configuration is merged once at startup from three layers, later layers
//! winning: hard-coded defaults, an optional JSON config file, and
//! environment variables. The resolved [`LLMConfig`] is immutable for the
//! process lifetime; there is no hot reload.

mod error;
mod loader;
mod prompts;
mod schema;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use prompts::{
    DEFAULT_ACTION_SYSTEM_PROMPT, DEFAULT_ACTION_USER_PROMPT, DEFAULT_SCRIPT_SYSTEM_PROMPT,
    DEFAULT_SCRIPT_USER_PROMPT,
};
pub use schema::{
    AnthropicConfig, AzureConfig, CustomConfig, EnhancementConfig, LLMConfig, OllamaConfig,
    OpenAiConfig, PromptsConfig, ProviderKind,
};
