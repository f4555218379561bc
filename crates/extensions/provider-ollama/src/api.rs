//! Ollama chat API types.

use serde::{Deserialize, Serialize};

/// Chat request (`POST /api/chat`).
#[derive(Debug, Serialize)]
pub struct ApiRequest {
    pub model: String,
    pub messages: Vec<ApiMessage>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<ApiOptions>,
}

/// Model options.
#[derive(Debug, Serialize)]
pub struct ApiOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Ollama's name for the generation token limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
}

/// API message format.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub role: String,
    pub content: String,
}

/// Non-streaming chat response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub message: ApiMessage,
}
