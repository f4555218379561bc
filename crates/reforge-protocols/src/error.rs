//! Provider errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// No provider registered under the configured name. Raised for custom
    /// providers; a broken custom-provider configuration must be visible
    /// rather than silently masked.
    #[error("Provider not found: {0}")]
    NotFound(String),

    /// The resolved configuration has no block for the selected provider.
    #[error("Missing configuration for provider: {0}")]
    MissingConfig(String),

    #[error("Provider already registered: {0}")]
    AlreadyRegistered(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}
