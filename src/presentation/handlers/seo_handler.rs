// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::{rejection::JsonRejection, Extension, Json};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::{
    application::{
        dto::analyze_request::AnalyzeShopifyRequestDto,
        use_cases::seo_use_case::AnalyzeShopifyUseCase,
    },
    presentation::errors::AppError,
};

/// `POST /analyze-shopify`
///
/// 请求体 `{url, language?}`，成功时返回模型生成的 SEO 分析 JSON
pub async fn analyze_shopify(
    Extension(use_case): Extension<Arc<AnalyzeShopifyUseCase>>,
    payload: Result<Json<AnalyzeShopifyRequestDto>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload?;
    let url = payload.target_url()?;
    let language = payload.language();

    info!(
        "Received Shopify analysis request for URL: {}, language: {}",
        url,
        language.code()
    );

    let analysis = use_case.execute(url, language).await?;
    Ok(Json(analysis))
}
