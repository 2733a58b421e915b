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
        dto::social_request::GenerateSocialRequestDto,
        use_cases::social_use_case::GenerateSocialUseCase,
    },
    presentation::errors::AppError,
};

/// `POST /generate-social`
///
/// 缺少 platform 或 topic 时直接返回 400，不会发起任何网络或模型调用
pub async fn generate_social(
    Extension(use_case): Extension<Arc<GenerateSocialUseCase>>,
    payload: Result<Json<GenerateSocialRequestDto>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload?;
    let platform = payload.platform()?;
    let topic = payload.topic()?;
    let language = payload.language();

    info!(
        "Received social generation request for platform: {}, language: {}",
        platform,
        language.code()
    );

    let content = use_case
        .execute(platform, topic, payload.keywords(), language)
        .await?;
    Ok(Json(content))
}
