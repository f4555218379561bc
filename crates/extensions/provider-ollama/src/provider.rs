//! Ollama provider implementation.

use async_trait::async_trait;

use reforge_protocols::{GenerateOptions, LLMProvider, Message, ProviderError};

use crate::api::{ApiMessage, ApiOptions, ApiRequest, ApiResponse};

/// Local inference server speaking the Ollama chat API.
pub struct OllamaProvider {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: trim_trailing_slash(base_url.into()),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    fn build_request(&self, messages: &[Message], options: GenerateOptions) -> ApiRequest {
        let api_options = match (options.temperature, options.max_tokens) {
            (None, None) => None,
            (temperature, max_tokens) => Some(ApiOptions {
                temperature,
                num_predict: max_tokens,
            }),
        };
        ApiRequest {
            model: self.model.clone(),
            messages: messages
                .iter()
                .map(|m| ApiMessage {
                    role: m.role.as_str().to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            stream: false,
            options: api_options,
        }
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    fn id(&self) -> &str {
        "ollama"
    }

    async fn generate(
        &self,
        messages: &[Message],
        options: GenerateOptions,
    ) -> Result<String, ProviderError> {
        let api_request = self.build_request(messages, options);
        let url = format!("{}/api/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, message });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if api_response.message.content.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(api_response.message.content)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
