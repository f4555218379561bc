//! OpenAI provider implementation.

use async_trait::async_trait;

use reforge_protocols::{GenerateOptions, LLMProvider, Message, ProviderError};

use crate::api::{error_message, ApiMessage, ApiRequest, ApiResponse};

const API_URL: &str = "https://api.openai.com/v1";

/// Hosted OpenAI chat-completions backend.
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, API_URL)
    }

    /// Use a non-default endpoint (proxies, compatible servers, tests).
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn build_request(&self, messages: &[Message], options: GenerateOptions) -> ApiRequest {
        ApiRequest {
            model: Some(self.model.clone()),
            messages: messages
                .iter()
                .map(|m| ApiMessage {
                    role: m.role.as_str().to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAiProvider {
    fn id(&self) -> &str {
        "openai"
    }

    async fn generate(
        &self,
        messages: &[Message],
        options: GenerateOptions,
    ) -> Result<String, ProviderError> {
        let api_request = self.build_request(messages, options);
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status,
                message: error_message(body),
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(content)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
