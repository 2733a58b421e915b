// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use shopseo::domain::services::llm_service::{
    GenerativeModel, LLMService, ModelCallError, ModelOutput,
};
use shopseo::utils::errors::SeoError;
use shopseo::utils::retry_policy::RetryPolicy;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// 按脚本依次返回结果的模型替身，并记录每次调用的时间
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<ModelOutput, ModelCallError>>>,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<ModelOutput, ModelCallError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, _prompt: &str) -> Result<ModelOutput, ModelCallError> {
        self.calls.lock().unwrap().push(Instant::now());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelCallError::Transport("script exhausted".to_string())))
    }
}

pub fn text_reply(text: &str) -> Result<ModelOutput, ModelCallError> {
    Ok(ModelOutput {
        candidate_texts: vec![text.to_string()],
        prompt_feedback: None,
    })
}

pub fn unavailable() -> ModelCallError {
    ModelCallError::Status {
        status: 503,
        message: "The model is overloaded".to_string(),
    }
}

fn service(model: Arc<ScriptedModel>) -> LLMService {
    LLMService::with_model(model, RetryPolicy::default())
}

#[tokio::test(start_paused = true)]
async fn test_retries_exhausted_after_two_backoffs() {
    let model = ScriptedModel::new(vec![
        Err(ModelCallError::Transport("connection reset".into())),
        Err(ModelCallError::Transport("connection reset".into())),
        Err(ModelCallError::Transport("connection reset".into())),
    ]);
    let start = Instant::now();

    let err = service(model.clone()).generate("prompt").await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "AI call failed after multiple retries: request to model provider failed: connection reset"
    );
    assert!(matches!(err, SeoError::ModelTransport(_)));

    let calls = model.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0] - start, Duration::from_secs(0));
    assert_eq!(calls[1] - calls[0], Duration::from_secs(5));
    assert_eq!(calls[2] - calls[1], Duration::from_secs(10));
}

#[tokio::test(start_paused = true)]
async fn test_success_after_retry() {
    let model = ScriptedModel::new(vec![
        Err(unavailable()),
        text_reply(r#"{"platform": "youtube"}"#),
    ]);

    let text = service(model.clone()).generate("prompt").await.unwrap();

    assert_eq!(text, r#"{"platform": "youtube"}"#);
    let calls = model.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1] - calls[0], Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_permanent_error_is_not_retried() {
    let model = ScriptedModel::new(vec![Err(ModelCallError::Status {
        status: 403,
        message: "API key not valid".to_string(),
    })]);

    let err = service(model.clone()).generate("prompt").await.unwrap_err();

    assert!(err
        .to_string()
        .starts_with("AI call failed with a non-retryable error:"));
    assert!(err.to_string().contains("API key not valid"));
    assert_eq!(model.calls().len(), 1);
}

#[tokio::test]
async fn test_blocked_and_empty_replies_are_not_retried() {
    let blocked = ScriptedModel::new(vec![Ok(ModelOutput {
        candidate_texts: vec![],
        prompt_feedback: Some(r#"{"blockReason":"SAFETY"}"#.to_string()),
    })]);
    let err = service(blocked.clone()).generate("prompt").await.unwrap_err();
    assert_eq!(err.to_string(), "AI Error: AI response blocked or empty.");
    assert_eq!(err.detail(), Some(r#"{"blockReason":"SAFETY"}"#));
    assert_eq!(blocked.calls().len(), 1);

    let empty = ScriptedModel::new(vec![Ok(ModelOutput {
        candidate_texts: vec!["   ".to_string()],
        prompt_feedback: None,
    })]);
    let err = service(empty.clone()).generate("prompt").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "AI Error: AI generated empty or non-text response."
    );
    assert_eq!(empty.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_custom_retry_budget() {
    let model = ScriptedModel::new(vec![]);
    let policy = RetryPolicy {
        max_retries: 0,
        ..RetryPolicy::default()
    };

    let err = LLMService::with_model(model.clone(), policy)
        .generate("prompt")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("script exhausted"));
    assert_eq!(model.calls().len(), 1);
}
