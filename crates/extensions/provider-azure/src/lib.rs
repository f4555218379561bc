//! Azure OpenAI backend.

mod provider;

pub use provider::AzureProvider;
