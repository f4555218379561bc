//! LLM provider trait definition.

use async_trait::async_trait;

use super::GenerateOptions;
use crate::error::ProviderError;
use crate::types::Message;

/// Uniform interface over chat-style LLM backends.
///
/// `generate` performs exactly one round trip to the backend. There is no
/// internal retry; retry policy belongs to the caller, and the enhancement
/// pipeline treats any error as "use the original code".
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &str;

    /// Generate a completion for an ordered list of role-tagged messages.
    async fn generate(
        &self,
        messages: &[Message],
        options: GenerateOptions,
    ) -> Result<String, ProviderError>;
}
