//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::prompts;

/// Resolved configuration for one process. Immutable after
/// [`crate::ConfigLoader::load`] returns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LLMConfig {
    /// Active backend.
    #[serde(default)]
    pub provider: ProviderKind,

    #[serde(default)]
    pub ollama: OllamaConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai: Option<OpenAiConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic: Option<AnthropicConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzureConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomConfig>,

    /// Verbose prompt/response logging.
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub enhancement: EnhancementConfig,

    #[serde(default)]
    pub prompts: PromptsConfig,
}

/// Backend selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Ollama,
    Openai,
    Anthropic,
    Azure,
    Custom,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Openai => "openai",
            Self::Anthropic => "anthropic",
            Self::Azure => "azure",
            Self::Custom => "custom",
        }
    }
}

/// Local inference server (Ollama-compatible chat API).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_url")]
    pub base_url: String,

    #[serde(default = "default_ollama_model")]
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_url(),
            model: default_ollama_model(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "qwen2.5-coder:7b".to_string()
}

/// Hosted OpenAI chat-completions backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenAiConfig {
    pub api_key: String,

    #[serde(default = "default_openai_model")]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl OpenAiConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: default_openai_model(),
            base_url: None,
        }
    }
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Hosted Anthropic messages backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnthropicConfig {
    pub api_key: String,

    #[serde(default = "default_anthropic_model")]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl AnthropicConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: default_anthropic_model(),
            base_url: None,
        }
    }
}

fn default_anthropic_model() -> String {
    "claude-3-5-sonnet-latest".to_string()
}

/// Azure OpenAI backend. Requires an endpoint and a deployment identifier in
/// addition to the API key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureConfig {
    pub api_key: String,

    pub endpoint: String,

    pub deployment: String,

    #[serde(default = "default_azure_api_version")]
    pub api_version: String,
}

impl AzureConfig {
    pub fn default_api_version() -> String {
        default_azure_api_version()
    }
}

fn default_azure_api_version() -> String {
    "2024-06-01".to_string()
}

/// Custom provider, resolved by name from the provider registry at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomConfig {
    pub name: String,
}

/// Policy knobs for the enhancement pipeline. Thresholds and quiet periods
/// are policy constants, not protocol requirements, so they are configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementConfig {
    /// Master switch for the whole feature.
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_action_timeout")]
    pub action_timeout_secs: u64,

    #[serde(default = "default_script_timeout")]
    pub script_timeout_secs: u64,

    /// Overall budget for the barrier that waits on pending requests before
    /// the whole-script call.
    #[serde(default = "default_pending_wait_budget")]
    pub pending_wait_budget_secs: u64,

    #[serde(default = "default_fill_quiet_period")]
    pub fill_quiet_period_ms: u64,

    #[serde(default = "default_press_quiet_period")]
    pub press_quiet_period_ms: u64,

    /// Minimum fraction of each counted operation that a whole-script rewrite
    /// must retain to be accepted.
    #[serde(default = "default_safety_threshold")]
    pub safety_threshold: f64,

    #[serde(default = "default_action_temperature")]
    pub action_temperature: f32,

    /// Whole-script rewrites are higher-risk, so they sample colder.
    #[serde(default = "default_script_temperature")]
    pub script_temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for EnhancementConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            action_timeout_secs: default_action_timeout(),
            script_timeout_secs: default_script_timeout(),
            pending_wait_budget_secs: default_pending_wait_budget(),
            fill_quiet_period_ms: default_fill_quiet_period(),
            press_quiet_period_ms: default_press_quiet_period(),
            safety_threshold: default_safety_threshold(),
            action_temperature: default_action_temperature(),
            script_temperature: default_script_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_action_timeout() -> u64 {
    30
}

fn default_script_timeout() -> u64 {
    60
}

fn default_pending_wait_budget() -> u64 {
    60
}

fn default_fill_quiet_period() -> u64 {
    3000
}

fn default_press_quiet_period() -> u64 {
    2000
}

fn default_safety_threshold() -> f64 {
    0.9
}

fn default_action_temperature() -> f32 {
    0.7
}

fn default_script_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    2048
}

/// Prompt templates with `{{placeholder}}` substitution points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptsConfig {
    #[serde(default = "default_action_system")]
    pub action_system: String,

    #[serde(default = "default_action_user")]
    pub action_user: String,

    #[serde(default = "default_script_system")]
    pub script_system: String,

    #[serde(default = "default_script_user")]
    pub script_user: String,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            action_system: default_action_system(),
            action_user: default_action_user(),
            script_system: default_script_system(),
            script_user: default_script_user(),
        }
    }
}

fn default_action_system() -> String {
    prompts::DEFAULT_ACTION_SYSTEM_PROMPT.to_string()
}

fn default_action_user() -> String {
    prompts::DEFAULT_ACTION_USER_PROMPT.to_string()
}

fn default_script_system() -> String {
    prompts::DEFAULT_SCRIPT_SYSTEM_PROMPT.to_string()
}

fn default_script_user() -> String {
    prompts::DEFAULT_SCRIPT_USER_PROMPT.to_string()
}
