//! Anthropic messages backend.

mod api;
mod provider;

pub use provider::AnthropicProvider;
