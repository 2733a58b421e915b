// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::{json, Value};
use shopseo::config::settings::LlmSettings;
use shopseo::domain::services::llm_service::{GenerativeModel, ModelCallError};
use shopseo::infrastructure::gemini::GeminiClient;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash-latest:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    let settings = LlmSettings {
        api_base_url: server.uri(),
        ..LlmSettings::default()
    };
    GeminiClient::new("test-key", &settings).unwrap()
}

#[tokio::test]
async fn test_generate_content_wire_format() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "{\"platform\": "}, {"text": "\"pinterest\"}"}]
                },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = client_for(&server).generate("Describe mugs").await.unwrap();
    assert_eq!(output.candidate_texts, vec![r#"{"platform": "pinterest"}"#]);
    assert!(output.prompt_feedback.is_none());

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Describe mugs");
    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(body["safetySettings"].as_array().unwrap().len(), 4);
    assert_eq!(
        body["safetySettings"][3]["category"],
        "HARM_CATEGORY_DANGEROUS_CONTENT"
    );
}

#[tokio::test]
async fn test_blocked_prompt_has_no_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let output = client_for(&server).generate("prompt").await.unwrap();
    assert!(output.candidate_texts.is_empty());
    assert!(output.prompt_feedback.unwrap().contains("SAFETY"));
}

#[tokio::test]
async fn test_error_status_classification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).generate("prompt").await.unwrap_err();
    match &err {
        ModelCallError::Status { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "API key not valid. Please pass a valid API key.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_overloaded_and_garbled_responses_are_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let overloaded = client.generate("prompt").await.unwrap_err();
    assert!(matches!(
        overloaded,
        ModelCallError::Status { status: 503, ref message } if message == "upstream unavailable"
    ));
    assert!(overloaded.is_retryable());

    let garbled = client.generate("prompt").await.unwrap_err();
    assert!(matches!(garbled, ModelCallError::Decode(_)));
    assert!(garbled.is_retryable());
}
