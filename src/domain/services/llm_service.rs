// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use metrics::counter;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::settings::LlmSettings;
use crate::infrastructure::gemini::GeminiClient;
use crate::infrastructure::metrics::{LLM_CALLS_TOTAL, LLM_RETRIES_TOTAL};
use crate::utils::errors::SeoError;
use crate::utils::retry_policy::RetryPolicy;

/// 模型的一次原始回复
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelOutput {
    /// 每个候选结果拼接后的文本，可能为空字符串
    pub candidate_texts: Vec<String>,
    /// 提供方返回的提示词反馈（通常说明拦截原因）
    pub prompt_feedback: Option<String>,
}

/// 模型调用错误
#[derive(Error, Debug)]
pub enum ModelCallError {
    /// 请求未能完成（连接失败、超时等）
    #[error("request to model provider failed: {0}")]
    Transport(String),
    /// 提供方返回非 2xx 状态码
    #[error("model provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// 响应体无法解码
    #[error("could not decode model provider response: {0}")]
    Decode(String),
}

impl ModelCallError {
    /// 请求本身有问题（参数错误、密钥无效、模型不存在）时重试没有意义
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelCallError::Status { status, .. } => !matches!(status, 400 | 401 | 403 | 404),
            ModelCallError::Transport(_) | ModelCallError::Decode(_) => true,
        }
    }
}

/// 生成式模型接口
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<ModelOutput, ModelCallError>;
}

/// LLM服务接口
#[async_trait]
pub trait LLMServiceTrait: Send + Sync {
    /// 发送提示词并返回模型的原始文本（预期为 JSON 字符串）
    async fn generate(&self, prompt: &str) -> Result<String, SeoError>;
}

/// LLM服务 - 处理与模型提供方的交互
///
/// # 功能
///
/// - 按 `RetryPolicy` 对传输失败做有界重试（默认 2 次，等待 5s、10s）
/// - 把无候选结果、无文本的回复转换为对应的错误
///
/// # 配置
///
/// 通过 `LlmSettings` 显式构造，未配置 API 密钥时构造即失败
pub struct LLMService {
    model: Arc<dyn GenerativeModel>,
    retry_policy: RetryPolicy,
}

#[async_trait]
impl LLMServiceTrait for LLMService {
    async fn generate(&self, prompt: &str) -> Result<String, SeoError> {
        LLMService::generate(self, prompt).await
    }
}

impl LLMService {
    /// 根据配置创建使用 Gemini 的服务
    ///
    /// # 错误
    /// * 未配置 API 密钥时返回 `Configuration("AI Model not configured")`
    pub fn from_settings(settings: &LlmSettings) -> Result<Self, SeoError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(SeoError::model_not_configured)?;

        let client = GeminiClient::new(api_key, settings)?;
        info!("Gemini model '{}' configured", settings.model);

        Ok(Self::with_model(
            Arc::new(client),
            RetryPolicy::from_llm_settings(settings),
        ))
    }

    pub fn with_model(model: Arc<dyn GenerativeModel>, retry_policy: RetryPolicy) -> Self {
        Self {
            model,
            retry_policy,
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, SeoError> {
        let mut retries_done = 0;

        loop {
            debug!(
                "Sending prompt to model (length: {} chars, attempt {})",
                prompt.chars().count(),
                retries_done + 1
            );

            let err = match self.model.generate(prompt).await {
                Ok(output) => {
                    let result = interpret_output(output);
                    let outcome = match &result {
                        Ok(_) => "success",
                        Err(e) => e.kind().as_str(),
                    };
                    counter!(LLM_CALLS_TOTAL, "outcome" => outcome).increment(1);
                    return result;
                }
                Err(err) => err,
            };

            if !err.is_retryable() {
                error!("Model call failed with a non-retryable error: {}", err);
                counter!(LLM_CALLS_TOTAL, "outcome" => "non_retryable").increment(1);
                return Err(SeoError::ModelTransport(format!(
                    "AI call failed with a non-retryable error: {}",
                    err
                )));
            }

            if !self.retry_policy.should_retry(retries_done) {
                error!("Model call failed after {} retries: {}", retries_done, err);
                counter!(LLM_CALLS_TOTAL, "outcome" => "retries_exhausted").increment(1);
                return Err(SeoError::ModelTransport(format!(
                    "AI call failed after multiple retries: {}",
                    err
                )));
            }

            retries_done += 1;
            let delay = self.retry_policy.calculate_backoff(retries_done);
            warn!(
                "Error calling model: {}. Retrying in {:?} ({} retries left)",
                err,
                delay,
                self.retry_policy.max_retries - retries_done + 1
            );
            counter!(LLM_RETRIES_TOTAL).increment(1);
            tokio::time::sleep(delay).await;
        }
    }
}

/// 解释模型回复：无候选 → 被拦截；首个候选无文本 → 空回复；否则原样返回文本
fn interpret_output(output: ModelOutput) -> Result<String, SeoError> {
    let Some(text) = output.candidate_texts.into_iter().next() else {
        let details = output.prompt_feedback.unwrap_or_else(|| "N/A".to_string());
        warn!("Model response blocked or empty. Prompt feedback: {}", details);
        return Err(SeoError::ModelBlocked { details });
    };

    if text.trim().is_empty() {
        warn!("No text parts found in model response");
        return Err(SeoError::ModelEmpty);
    }

    Ok(text)
}
