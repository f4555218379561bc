//! Layered configuration loader.
//!
//! Precedence, lowest to highest: hard-coded defaults, JSON config file,
//! environment variables. Loading never fails; a broken layer is logged and
//! skipped.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::schema::{
    AnthropicConfig, AzureConfig, CustomConfig, EnhancementConfig, LLMConfig, OllamaConfig,
    OpenAiConfig, PromptsConfig, ProviderKind,
};

/// Conventional config file name probed in the working directory.
const LOCAL_CONFIG_FILE: &str = "reforge.config.json";

/// Conventional config file path probed under the home directory.
const HOME_CONFIG_FILE: &str = ".reforge/config.json";

/// Partial configuration parsed from a file. Present sections replace the
/// corresponding default section wholesale (shallow merge per section).
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileOverlay {
    provider: Option<ProviderKind>,
    ollama: Option<OllamaConfig>,
    openai: Option<OpenAiConfig>,
    anthropic: Option<AnthropicConfig>,
    azure: Option<AzureConfig>,
    custom: Option<CustomConfig>,
    debug: Option<bool>,
    enhancement: Option<EnhancementConfig>,
    prompts: Option<PromptsConfig>,
}

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolve the process configuration. Never fails; the worst case is the
    /// hard-coded defaults with environment overrides applied.
    pub fn load(config_path: Option<&Path>) -> LLMConfig {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`Self::load`] with an injected environment lookup.
    pub fn load_with<F>(config_path: Option<&Path>, env: F) -> LLMConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = LLMConfig::default();

        let path = config_path
            .map(PathBuf::from)
            .or_else(Self::probe_conventional_paths);

        let overlay = match path {
            Some(path) => match Self::read_overlay(&path) {
                Ok(overlay) => {
                    debug!(path = %path.display(), "loaded config file");
                    overlay
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "ignoring unreadable config file");
                    FileOverlay::default()
                }
            },
            None => FileOverlay::default(),
        };

        let provider_from_file = overlay.provider.is_some();
        Self::apply_overlay(&mut config, overlay);
        Self::apply_env(&mut config, provider_from_file, &env);
        config
    }

    fn probe_conventional_paths() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }
        let home = dirs::home_dir()?.join(HOME_CONFIG_FILE);
        home.exists().then_some(home)
    }

    fn read_overlay(path: &Path) -> Result<FileOverlay, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn apply_overlay(config: &mut LLMConfig, overlay: FileOverlay) {
        if let Some(provider) = overlay.provider {
            config.provider = provider;
        }
        if let Some(ollama) = overlay.ollama {
            config.ollama = ollama;
        }
        if overlay.openai.is_some() {
            config.openai = overlay.openai;
        }
        if overlay.anthropic.is_some() {
            config.anthropic = overlay.anthropic;
        }
        if overlay.azure.is_some() {
            config.azure = overlay.azure;
        }
        if overlay.custom.is_some() {
            config.custom = overlay.custom;
        }
        if let Some(debug) = overlay.debug {
            config.debug = debug;
        }
        if let Some(enhancement) = overlay.enhancement {
            config.enhancement = enhancement;
        }
        if let Some(prompts) = overlay.prompts {
            config.prompts = prompts;
        }
    }

    /// Environment overrides. Connection URL, model name and flags always win
    /// over the file. A hosted-provider credential variable selects that
    /// backend when the file named no provider, first match winning in
    /// openai, anthropic, azure order.
    fn apply_env<F>(config: &mut LLMConfig, provider_from_file: bool, env: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env("OLLAMA_BASE_URL") {
            config.ollama.base_url = url;
        }
        if let Some(model) = env("OLLAMA_MODEL") {
            config.ollama.model = model;
        }
        if let Some(flag) = env("REFORGE_ENHANCE") {
            config.enhancement.enabled = parse_flag(&flag);
        }
        if let Some(flag) = env("REFORGE_DEBUG") {
            config.debug = parse_flag(&flag);
        }

        let mut provider_selected = provider_from_file;

        if let Some(key) = env("OPENAI_API_KEY") {
            if config.openai.is_none() {
                let mut openai = OpenAiConfig::with_api_key(key);
                if let Some(model) = env("OPENAI_MODEL") {
                    openai.model = model;
                }
                config.openai = Some(openai);
            }
            if !provider_selected {
                config.provider = ProviderKind::Openai;
                provider_selected = true;
            }
        }

        if let Some(key) = env("ANTHROPIC_API_KEY") {
            if config.anthropic.is_none() {
                let mut anthropic = AnthropicConfig::with_api_key(key);
                if let Some(model) = env("ANTHROPIC_MODEL") {
                    anthropic.model = model;
                }
                config.anthropic = Some(anthropic);
            }
            if !provider_selected {
                config.provider = ProviderKind::Anthropic;
                provider_selected = true;
            }
        }

        if let Some(key) = env("AZURE_OPENAI_API_KEY") {
            if config.azure.is_none() {
                match (env("AZURE_OPENAI_ENDPOINT"), env("AZURE_OPENAI_DEPLOYMENT")) {
                    (Some(endpoint), Some(deployment)) => {
                        config.azure = Some(AzureConfig {
                            api_key: key,
                            endpoint,
                            deployment,
                            api_version: AzureConfig::default_api_version(),
                        });
                    }
                    _ => {
                        warn!(
                            "AZURE_OPENAI_API_KEY is set but AZURE_OPENAI_ENDPOINT or \
                             AZURE_OPENAI_DEPLOYMENT is missing; ignoring"
                        );
                        return;
                    }
                }
            }
            if !provider_selected {
                config.provider = ProviderKind::Azure;
            }
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
