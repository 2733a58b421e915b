// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::application::use_cases::{
    seo_use_case::AnalyzeShopifyUseCase, social_use_case::GenerateSocialUseCase,
};
use crate::domain::services::llm_service::LLMServiceTrait;
use crate::domain::services::scrape_service::ScrapeServiceTrait;
use crate::presentation::handlers::{page_handler, seo_handler, social_handler};

/// 创建应用路由
///
/// # 参数
///
/// * `scrape_service` - 页面抓取服务
/// * `llm_service` - 模型服务，`None` 表示未配置 API 密钥
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(
    scrape_service: Arc<dyn ScrapeServiceTrait>,
    llm_service: Option<Arc<dyn LLMServiceTrait>>,
) -> Router {
    let analyze = Arc::new(AnalyzeShopifyUseCase::new(
        scrape_service,
        llm_service.clone(),
    ));
    let social = Arc::new(GenerateSocialUseCase::new(llm_service));

    let page_routes = Router::new()
        .route("/", get(page_handler::index))
        .route("/shopify-seo", get(page_handler::shopify_seo_page))
        .route("/social-media", get(page_handler::social_media_page))
        .route("/health", get(health_check))
        .route("/version", get(version));

    let api_routes = Router::new()
        .route("/analyze-shopify", post(seo_handler::analyze_shopify))
        .route("/generate-social", post(social_handler::generate_social))
        .layer(Extension(analyze))
        .layer(Extension(social));

    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
