// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{html_page, mock_store, test_server, FakeLlm, PRODUCT_PAGE};
use crate::unit::domain::llm_service_test::{unavailable, ScriptedModel};
use axum::http::StatusCode;
use serde_json::{json, Value};
use shopseo::domain::services::llm_service::{LLMService, LLMServiceTrait};
use shopseo::utils::retry_policy::RetryPolicy;
use std::sync::Arc;
use std::time::Duration;
use wiremock::{MockServer, ResponseTemplate};

const SEO_REPLY: &str = r#"{
    "analysis_language": "en",
    "core_seo": {"suggested_title": "Hand-made Ceramic Mug"},
    "content_keywords": {"main_topic": "mugs", "suggested_keywords": ["ceramic mug"], "blog_post_ideas": []},
    "on_page_technical": {"technical_tips": []}
}"#;

fn product_url(store: &MockServer) -> String {
    format!("{}/products/mug", store.uri())
}

async fn page_requests(store: &MockServer) -> usize {
    store
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == "/products/mug")
        .count()
}

/// robots.txt 禁止抓取时返回 400，且不请求页面
#[tokio::test]
async fn test_robots_denial_returns_bad_request() {
    let store = mock_store(
        ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /\n"),
        html_page(PRODUCT_PAGE),
    )
    .await;
    let llm = FakeLlm::replying(SEO_REPLY);
    let server = test_server(Some(llm.clone()));

    let response = server
        .post("/analyze-shopify")
        .json(&json!({ "url": product_url(&store) }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Scraping disallowed by robots.txt" })
    );
    assert_eq!(page_requests(&store).await, 0);
    assert!(llm.prompts().is_empty());
}

/// 页面请求超时返回 500
#[tokio::test]
async fn test_page_timeout_returns_server_error() {
    let store = mock_store(
        ResponseTemplate::new(404),
        html_page(PRODUCT_PAGE).set_delay(Duration::from_secs(3)),
    )
    .await;
    let server = test_server(Some(FakeLlm::replying(SEO_REPLY)));
    let url = product_url(&store);

    let response = server
        .post("/analyze-shopify")
        .json(&json!({ "url": url }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], format!("Timeout scraping {}", url));
}

#[tokio::test]
async fn test_page_http_error_returns_server_error() {
    let store = mock_store(ResponseTemplate::new(404), ResponseTemplate::new(404)).await;
    let server = test_server(Some(FakeLlm::replying(SEO_REPLY)));
    let url = product_url(&store);

    let response = server
        .post("/analyze-shopify")
        .json(&json!({ "url": url }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"],
        format!("HTTP Error 404 for {}", url)
    );
}

#[tokio::test]
async fn test_analyze_shopify_success() {
    let store = mock_store(
        ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /checkout\n"),
        html_page(PRODUCT_PAGE),
    )
    .await;
    let llm = FakeLlm::replying(SEO_REPLY);
    let server = test_server(Some(llm.clone()));

    let response = server
        .post("/analyze-shopify")
        .json(&json!({ "url": product_url(&store), "language": "en" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let expected: Value = serde_json::from_str(SEO_REPLY).unwrap();
    assert_eq!(response.json::<Value>(), expected);

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Title: Ceramic Mug | Clay Co"));
    assert!(prompts[0].contains("Meta Description: Hand-made ceramic mugs from Cluj."));
    assert!(prompts[0].contains(r#"Detected Schema Types (Sample): ["Product"]"#));
    assert!(prompts[0].contains(r#"Image Alt Texts (Sample): ["Blue ceramic mug"]"#));
    assert!(prompts[0].contains("Internal: 1, External: 1"));
    assert!(prompts[0].contains("written in English"));
}

#[tokio::test]
async fn test_analyze_without_model_fails_before_scraping() {
    let store = mock_store(ResponseTemplate::new(404), html_page(PRODUCT_PAGE)).await;
    let server = test_server(None);

    let response = server
        .post("/analyze-shopify")
        .json(&json!({ "url": product_url(&store) }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "AI Model not configured" })
    );
    assert!(store.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_analyze_request_validation() {
    let server = test_server(Some(FakeLlm::replying(SEO_REPLY)));

    for body in [json!({}), json!({ "url": "ftp://shop.example" }), json!({ "url": "shop.example" })] {
        let response = server.post("/analyze-shopify").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({ "error": "Invalid or missing 'url' parameter" })
        );
    }

    let response = server
        .post("/analyze-shopify")
        .text("url=https://shop.example")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Request must be JSON" })
    );
}

#[tokio::test]
async fn test_model_output_errors_surface_as_server_errors() {
    let store = mock_store(ResponseTemplate::new(404), html_page(PRODUCT_PAGE)).await;

    let reported = test_server(Some(FakeLlm::replying(r#"{"error": "quota exceeded"}"#)));
    let response = reported
        .post("/analyze-shopify")
        .json(&json!({ "url": product_url(&store) }))
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "AI Error: quota exceeded" })
    );

    let garbled = test_server(Some(FakeLlm::replying("Sure! Here are some ideas: ...")));
    let response = garbled
        .post("/generate-social")
        .json(&json!({ "platform": "instagram", "topic": "ceramic mugs" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Failed to parse AI response as JSON" })
    );
}

/// 模型返回合法 JSON 但不是对象时不能作为成功结果返回
#[tokio::test]
async fn test_non_object_model_reply_is_rejected() {
    for reply in ["null", "42", r#""just text""#] {
        let server = test_server(Some(FakeLlm::replying(reply)));

        let response = server
            .post("/generate-social")
            .json(&json!({ "platform": "youtube", "topic": "ceramic mugs" }))
            .await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>(),
            json!({ "error": "Failed to parse AI response as JSON" })
        );
    }
}

/// 不支持的平台返回 500，且不调用模型
#[tokio::test]
async fn test_unsupported_platform() {
    let llm = FakeLlm::replying("{}");
    let server = test_server(Some(llm.clone()));

    let response = server
        .post("/generate-social")
        .json(&json!({ "platform": "tiktok", "topic": "ceramic mugs" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Unsupported social platform: tiktok"));
    assert!(llm.prompts().is_empty());
}

/// 模型调用重试耗尽：共 3 次调用，间隔 5s、10s
#[tokio::test(start_paused = true)]
async fn test_model_retries_exhausted() {
    let model = ScriptedModel::new(vec![
        Err(unavailable()),
        Err(unavailable()),
        Err(unavailable()),
    ]);
    let llm: Arc<dyn LLMServiceTrait> = Arc::new(LLMService::with_model(
        model.clone(),
        RetryPolicy::default(),
    ));
    let server = test_server(Some(llm));

    let response = server
        .post("/generate-social")
        .json(&json!({ "platform": "youtube", "topic": "ceramic mugs" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "error": "AI call failed after multiple retries: model provider returned HTTP 503: The model is overloaded"
        })
    );

    let calls = model.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1] - calls[0], Duration::from_secs(5));
    assert_eq!(calls[2] - calls[1], Duration::from_secs(10));
}

/// 缺少 topic 时在任何网络或模型调用之前返回 400
#[tokio::test]
async fn test_missing_topic_rejected_before_model_call() {
    let llm = FakeLlm::replying("{}");
    let server = test_server(Some(llm.clone()));

    let response = server
        .post("/generate-social")
        .json(&json!({ "platform": "youtube" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Missing 'topic' or description parameter" })
    );
    assert!(llm.prompts().is_empty());

    let response = server
        .post("/generate-social")
        .json(&json!({ "topic": "ceramic mugs" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Missing 'platform' parameter" })
    );

    // Input validation comes before the model configuration check
    let unconfigured = test_server(None);
    let response = unconfigured
        .post("/generate-social")
        .json(&json!({ "platform": "youtube", "topic": "" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_social_success() {
    let reply = json!({
        "platform": "pinterest",
        "language": "ro",
        "pin_concepts": [],
        "suggested_boards": ["Căni", "Bucătărie", "Cadouri"],
        "visual_appeal_explanation": "..."
    });
    let llm = FakeLlm::replying(&reply.to_string());
    let server = test_server(Some(llm.clone()));

    let response = server
        .post("/generate-social")
        .json(&json!({
            "platform": "Pinterest",
            "topic": "ceramic mugs",
            "keywords": "handmade, gift",
            "language": "ro"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), reply);

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("specializing in PINTEREST"));
    assert!(prompts[0].contains("- Main Topic/Product: 'ceramic mugs'"));
    assert!(prompts[0].contains("- Keywords: handmade, gift"));
    assert!(prompts[0].contains("written in Romanian"));
}

#[tokio::test]
async fn test_page_routes() {
    let server = test_server(None);

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/shopify-seo");

    let response = server.get("/shopify-seo").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Shopify SEO Analyzer"));

    let response = server.get("/social-media").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("social-generate-button"));

    let response = server.get("/health").await;
    assert_eq!(response.text(), "OK");

    let response = server.get("/version").await;
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}
