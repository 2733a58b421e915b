// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::types::{
    Content, ErrorResponse, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    SafetySetting,
};
use crate::config::settings::LlmSettings;
use crate::domain::services::llm_service::{GenerativeModel, ModelCallError, ModelOutput};
use crate::utils::errors::SeoError;

/// 单次请求的超时时间
const REQUEST_TIMEOUT_SECS: u64 = 120;
const API_VERSION: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

/// Gemini `generateContent` 客户端
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(api_key: &str, settings: &LlmSettings) -> Result<Self, SeoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| SeoError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: api_key.to_string(),
            temperature: settings.temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, API_VERSION, self.model
        )
    }

    fn request_body(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                response_mime_type: JSON_MIME_TYPE.to_string(),
            },
            safety_settings: SafetySetting::block_medium_and_above(),
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<ModelOutput, ModelCallError> {
        debug!("Generating content from model {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| ModelCallError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ModelCallError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|err| err.error.message)
                .unwrap_or(body);
            return Err(ModelCallError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| ModelCallError::Decode(e.to_string()))?;

        Ok(ModelOutput {
            candidate_texts: parsed
                .candidates
                .iter()
                .map(|candidate| {
                    candidate
                        .content
                        .as_ref()
                        .map(Content::text)
                        .unwrap_or_default()
                })
                .collect(),
            prompt_feedback: parsed.prompt_feedback.map(|feedback| feedback.to_string()),
        })
    }
}
