// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::domain::models::prompt::{Language, PromptRequest};
use crate::domain::services::llm_service::LLMServiceTrait;
use crate::domain::services::prompt_service::PromptService;
use crate::domain::services::response_validator::validate_response;
use crate::domain::services::scrape_service::ScrapeServiceTrait;
use crate::utils::errors::SeoError;

/// 店铺 SEO 分析用例
///
/// 抓取页面 → 构建 SEO 提示词 → 调用模型 → 校验输出
#[derive(Clone)]
pub struct AnalyzeShopifyUseCase {
    scrape_service: Arc<dyn ScrapeServiceTrait>,
    llm_service: Option<Arc<dyn LLMServiceTrait>>,
}

impl AnalyzeShopifyUseCase {
    pub fn new(
        scrape_service: Arc<dyn ScrapeServiceTrait>,
        llm_service: Option<Arc<dyn LLMServiceTrait>>,
    ) -> Self {
        Self {
            scrape_service,
            llm_service,
        }
    }

    pub async fn execute(&self, url: &str, language: Language) -> Result<Value, SeoError> {
        // Fail before touching the network when no model is configured
        let llm = self
            .llm_service
            .as_ref()
            .ok_or_else(SeoError::model_not_configured)?;

        info!(
            "Analyzing {} for SEO in {}",
            url,
            language.display_name()
        );

        let page = self.scrape_service.scrape(url).await?;
        let prompt = PromptService::build(&PromptRequest::ShopifySeo {
            page: &page,
            language,
        })?;
        let raw = llm.generate(&prompt).await?;
        let analysis = validate_response(&raw)?;

        info!("SEO analysis for {} generated and parsed successfully", url);
        Ok(analysis)
    }
}
