//! Azure OpenAI provider implementation.
//!
//! Azure speaks the OpenAI chat-completions dialect but routes by deployment
//! rather than model and authenticates with an `api-key` header, so the wire
//! types are shared with the OpenAI crate.

use async_trait::async_trait;

use reforge_protocols::{GenerateOptions, LLMProvider, Message, ProviderError};
use reforge_provider_openai::api::{error_message, ApiMessage, ApiRequest, ApiResponse};

/// Azure OpenAI deployment backend.
pub struct AzureProvider {
    api_key: String,
    endpoint: String,
    deployment: String,
    api_version: String,
    client: reqwest::Client,
}

impl AzureProvider {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        let mut endpoint = endpoint.into();
        while endpoint.ends_with('/') {
            endpoint.pop();
        }
        Self {
            api_key: api_key.into(),
            endpoint,
            deployment: deployment.into(),
            api_version: api_version.into(),
            client: reqwest::Client::new(),
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }

    fn build_request(&self, messages: &[Message], options: GenerateOptions) -> ApiRequest {
        ApiRequest {
            // The deployment in the URL decides the model.
            model: None,
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
impl LLMProvider for AzureProvider {
    fn id(&self) -> &str {
        "azure"
    }

    async fn generate(
        &self,
        messages: &[Message],
        options: GenerateOptions,
    ) -> Result<String, ProviderError> {
        let api_request = self.build_request(messages, options);

        let response = self
            .client
            .post(self.request_url())
            .header("api-key", &self.api_key)
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
