//! Ollama-compatible local inference backend.

mod api;
mod provider;

pub use provider::OllamaProvider;
