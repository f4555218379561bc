//! Registry for custom providers.

use std::sync::Arc;

use dashmap::DashMap;

use reforge_protocols::{LLMProvider, ProviderError};

/// Registry resolving custom provider names to implementations.
///
/// Custom providers are registered at startup, before configuration selects
/// one by name. This replaces runtime module loading: a misconfigured name
/// fails [`crate::create_provider`] with a visible error instead of being
/// silently masked.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: DashMap<String, Arc<dyn LLMProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its own ID.
    pub fn register(&self, provider: Arc<dyn LLMProvider>) -> Result<(), ProviderError> {
        let id = provider.id().to_string();
        if self.providers.contains_key(&id) {
            return Err(ProviderError::AlreadyRegistered(id));
        }
        self.providers.insert(id, provider);
        Ok(())
    }

    /// Get a provider by ID.
    pub fn get(&self, id: &str) -> Option<Arc<dyn LLMProvider>> {
        self.providers.get(id).map(|p| p.clone())
    }

    /// List all registered provider IDs.
    pub fn list_ids(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.id().to_string()).collect()
    }
}
