// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::domain::models::prompt::Language;
use crate::domain::services::llm_service::LLMServiceTrait;
use crate::domain::services::prompt_service::PromptService;
use crate::domain::services::response_validator::validate_response;
use crate::utils::errors::SeoError;
use crate::utils::text_processing::truncate_chars;

/// 社交媒体内容生成用例
#[derive(Clone)]
pub struct GenerateSocialUseCase {
    llm_service: Option<Arc<dyn LLMServiceTrait>>,
}

impl GenerateSocialUseCase {
    pub fn new(llm_service: Option<Arc<dyn LLMServiceTrait>>) -> Self {
        Self { llm_service }
    }

    /// 校验平台和主题 → 构建提示词 → 调用模型 → 校验输出
    pub async fn execute(
        &self,
        platform: &str,
        topic: &str,
        keywords: Option<&str>,
        language: Language,
    ) -> Result<Value, SeoError> {
        let request = PromptService::social_request(platform, topic, keywords, language)?;
        let prompt = PromptService::build(&request)?;

        let llm = self
            .llm_service
            .as_ref()
            .ok_or_else(SeoError::model_not_configured)?;

        info!(
            "Generating {} content about '{}' in {}",
            request.use_case(),
            truncate_chars(topic, 50),
            language.display_name()
        );

        let raw = llm.generate(&prompt).await?;
        validate_response(&raw)
    }
}
