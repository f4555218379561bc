//! OpenAI chat-completions backend.

pub mod api;
mod provider;

pub use provider::OpenAiProvider;
