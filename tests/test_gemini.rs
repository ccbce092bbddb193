//! Integration tests for the Gemini client
//!
//! Tests behavioral contracts against a mocked HTTP surface:
//! - request shape (contents, system instruction, generation config)
//! - candidate text extraction
//! - error scenarios (HTTP errors, API error bodies, empty candidates)

use inferflow::llm::{
    CompletionRequest, GeminiClient, GeminiConfig, GenerationConfig, LlmClient, LlmError,
    ModelConfig,
};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(base_url: &str) -> GeminiConfig {
    GeminiConfig {
        api_key: "test-api-key".to_string(),
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
        model: ModelConfig {
            model: "gemini-2.5-pro-preview-03-25".to_string(),
            system_instruction: String::new(),
        },
    }
}

fn generate_path() -> &'static str {
    "/models/gemini-2.5-pro-preview-03-25:generateContent"
}

fn candidate_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            {
                "content": {
                    "role": "model",
                    "parts": [{"text": text}]
                },
                "finishReason": "STOP"
            }
        ]
    })
}

#[tokio::test]
async fn test_gemini_returns_candidate_text_on_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .and(query_param("key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("Hello there")))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::new(test_config(&mock_server.uri())).unwrap();
    let result = client
        .complete(CompletionRequest::single_turn("Hi", None))
        .await;

    assert_eq!(result.unwrap(), "Hello there");
}

#[tokio::test]
async fn test_gemini_sends_prompt_as_user_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .and(body_partial_json(serde_json::json!({
            "contents": [
                {"role": "user", "parts": [{"text": "What is 2+2?"}]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("4")))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::new(test_config(&mock_server.uri())).unwrap();
    let result = client
        .complete(CompletionRequest::single_turn("What is 2+2?", None))
        .await;

    assert_eq!(result.unwrap(), "4");
}

#[tokio::test]
async fn test_gemini_passes_generation_config_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .and(body_partial_json(serde_json::json!({
            "generationConfig": {
                "temperature": 0.25,
                "topK": 40,
                "maxOutputTokens": 128
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("ok")))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::new(test_config(&mock_server.uri())).unwrap();
    let request = CompletionRequest::single_turn(
        "Hi",
        Some(GenerationConfig {
            temperature: Some(0.25),
            top_p: None,
            top_k: Some(40),
            max_output_tokens: Some(128),
            response_mime_type: None,
        }),
    );

    assert!(client.complete(request).await.is_ok());
}

#[tokio::test]
async fn test_gemini_sends_system_instruction_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .and(body_partial_json(serde_json::json!({
            "systemInstruction": {
                "parts": [{"text": "Answer in French."}]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body("Bonjour")))
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server.uri());
    config.model.system_instruction = "Answer in French.".to_string();
    let client = GeminiClient::new(config).unwrap();

    let result = client
        .complete(CompletionRequest::single_turn("Hello", None))
        .await;
    assert_eq!(result.unwrap(), "Bonjour");
}

#[tokio::test]
async fn test_gemini_joins_multiple_parts() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "candidates": [
            {
                "content": {
                    "parts": [
                        {"text": "First part. "},
                        {"text": "Second part."}
                    ]
                }
            }
        ]
    });

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::new(test_config(&mock_server.uri())).unwrap();
    let result = client
        .complete(CompletionRequest::single_turn("Hi", None))
        .await;

    assert_eq!(result.unwrap(), "First part. Second part.");
}

#[tokio::test]
async fn test_gemini_http_error_maps_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::new(test_config(&mock_server.uri())).unwrap();
    let result = client
        .complete(CompletionRequest::single_turn("Hi", None))
        .await;

    match result {
        Err(LlmError::ApiError(message)) => {
            assert!(message.contains("429"));
            assert!(message.contains("quota exceeded"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_gemini_error_body_maps_to_api_error() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {"message": "API key not valid", "code": 400}
    });

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::new(test_config(&mock_server.uri())).unwrap();
    let result = client
        .complete(CompletionRequest::single_turn("Hi", None))
        .await;

    match result {
        Err(LlmError::ApiError(message)) => assert!(message.contains("API key not valid")),
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_gemini_missing_candidates_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::new(test_config(&mock_server.uri())).unwrap();
    let result = client
        .complete(CompletionRequest::single_turn("Hi", None))
        .await;

    assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_gemini_candidate_without_parts_is_invalid_response() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "candidates": [{"content": {}}]
    });

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let client = GeminiClient::new(test_config(&mock_server.uri())).unwrap();
    let result = client
        .complete(CompletionRequest::single_turn("Hi", None))
        .await;

    assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_gemini_network_failure_maps_to_network_error() {
    // Point at a closed port; no server is listening.
    let config = GeminiConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        ..test_config("unused")
    };

    let client = GeminiClient::new(config).unwrap();
    let result = client
        .complete(CompletionRequest::single_turn("Hi", None))
        .await;

    assert!(matches!(result, Err(LlmError::NetworkError(_))));
}
