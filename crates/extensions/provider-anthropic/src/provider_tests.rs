use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

use super::*;

#[test]
fn test_provider_id() {
    let provider = AnthropicProvider::new("sk-ant", "claude-3-5-sonnet-latest");
    assert_eq!(provider.id(), "anthropic");
}

#[test]
fn test_build_request_hoists_system_message() {
    let provider = AnthropicProvider::new("sk-ant", "claude-3-5-sonnet-latest");
    let messages = vec![Message::system("be careful"), Message::user("rewrite this")];

    let request = provider.build_request(&messages, GenerateOptions::default());
    assert_eq!(request.system.as_deref(), Some("be careful"));
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, "user");
    assert_eq!(request.max_tokens, 2048);
}

#[test]
fn test_build_request_without_system_message() {
    let provider = AnthropicProvider::new("sk-ant", "claude-3-5-sonnet-latest");
    let request = provider.build_request(&[Message::user("hi")], GenerateOptions::default());
    assert!(request.system.is_none());
}

#[tokio::test]
async fn test_generate_success() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "id": "msg_123",
        "model": "claude-3-5-sonnet-latest",
        "content": [{"type": "text", "text": "enhanced code"}],
        "stop_reason": "end_turn"
    });
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/messages"))
        .and(matchers::header("x-api-key", "sk-ant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider =
        AnthropicProvider::with_base_url("sk-ant", "claude-3-5-sonnet-latest", mock_server.uri());
    let result = provider
        .generate(&[Message::user("hello")], GenerateOptions::default())
        .await;
    assert_eq!(result.unwrap(), "enhanced code");
}

#[tokio::test]
async fn test_generate_api_error_extracts_message() {
    let mock_server = MockServer::start().await;

    let error_body =
        r#"{"error": {"message": "invalid x-api-key", "type": "authentication_error"}}"#;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string(error_body))
        .mount(&mock_server)
        .await;

    let provider =
        AnthropicProvider::with_base_url("bad", "claude-3-5-sonnet-latest", mock_server.uri());
    let err = provider
        .generate(&[Message::user("hello")], GenerateOptions::default())
        .await
        .unwrap_err();
    match err {
        ProviderError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "invalid x-api-key");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_generate_skips_non_text_blocks() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "content": [
            {"type": "thinking", "thinking": "..."},
            {"type": "text", "text": "after thinking"}
        ]
    });
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&mock_server)
        .await;

    let provider =
        AnthropicProvider::with_base_url("sk-ant", "claude-3-5-sonnet-latest", mock_server.uri());
    let result = provider
        .generate(&[Message::user("hello")], GenerateOptions::default())
        .await;
    assert_eq!(result.unwrap(), "after thinking");
}
