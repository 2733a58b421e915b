// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{fast_scraper_settings, html_page, mock_store, scrape_service, PRODUCT_PAGE};
use serde_json::json;
use shopseo::config::settings::ScraperSettings;
use shopseo::domain::services::scrape_service::{ScrapeService, ScrapeServiceTrait};
use shopseo::utils::errors::SeoError;
use wiremock::ResponseTemplate;

#[tokio::test]
async fn test_scrape_product_page() {
    let store = mock_store(ResponseTemplate::new(404), html_page(PRODUCT_PAGE)).await;
    let url = format!("{}/products/mug", store.uri());

    let result = scrape_service().scrape(&url).await.unwrap();

    assert_eq!(result.url, url);
    assert_eq!(result.title, "Ceramic Mug | Clay Co");
    assert_eq!(result.meta_description, "Hand-made ceramic mugs from Cluj.");
    assert_eq!(result.h1, "Ceramic Mug");
    assert_eq!(result.headings["h2"], vec!["Details"]);
    assert_eq!(result.alt_texts, vec!["Blue ceramic mug"]);
    assert_eq!(result.schema_blocks.len(), 1);
    assert_eq!(result.schema_blocks[0]["@type"], json!("Product"));
    assert_eq!(result.links.internal_count, 1);
    assert_eq!(result.links.external_count, 1);
    assert!(result.content_snippet.starts_with("Ceramic Mug"));
    assert!(result.content_snippet.contains("glazed in small batches"));
    assert!(!result.content_snippet.contains("Instagram"));
}

#[tokio::test]
async fn test_robots_denial_skips_page_fetch() {
    let store = mock_store(
        ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /products\n"),
        html_page(PRODUCT_PAGE),
    )
    .await;

    let err = scrape_service()
        .scrape(&format!("{}/products/mug", store.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, SeoError::PolicyDenied));
    assert_eq!(err.to_string(), "Scraping disallowed by robots.txt");

    let requests = store.received_requests().await.unwrap_or_default();
    assert!(requests.iter().all(|r| r.url.path() == "/robots.txt"));
}

#[tokio::test]
async fn test_http_error_status() {
    let store = mock_store(ResponseTemplate::new(404), ResponseTemplate::new(404)).await;
    let url = format!("{}/products/mug", store.uri());

    let err = scrape_service().scrape(&url).await.unwrap_err();

    assert!(!err.is_client_error());
    assert_eq!(err.to_string(), format!("HTTP Error 404 for {}", url));
}

/// 私有地址目标在发出任何请求（包括 robots.txt）之前被拒绝
#[tokio::test]
async fn test_private_target_rejected_before_any_request() {
    let store = mock_store(ResponseTemplate::new(404), html_page(PRODUCT_PAGE)).await;
    let service = ScrapeService::from_settings(&ScraperSettings {
        block_private_addresses: true,
        ..fast_scraper_settings()
    })
    .unwrap();

    let err = service
        .scrape(&format!("{}/products/mug", store.uri()))
        .await
        .unwrap_err();

    assert!(!err.is_client_error());
    assert!(err
        .to_string()
        .starts_with("Request error: target address rejected: private address is not allowed"));
    assert!(store.received_requests().await.unwrap_or_default().is_empty());
}
