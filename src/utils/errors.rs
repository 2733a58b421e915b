// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::engines::traits::FetchError;

/// 错误类别
///
/// 与 `SeoError` 的变体一一对应，便于日志和指标按类别聚合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    PolicyDenied,
    Network,
    InvalidInput,
    MissingInput,
    UnsupportedPlatform,
    ModelBlocked,
    ModelEmpty,
    ModelTransport,
    ResponseParse,
    ModelReported,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::PolicyDenied => "policy_denied",
            ErrorKind::Network => "network",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::MissingInput => "missing_input",
            ErrorKind::UnsupportedPlatform => "unsupported_platform",
            ErrorKind::ModelBlocked => "model_blocked",
            ErrorKind::ModelEmpty => "model_empty",
            ErrorKind::ModelTransport => "model_transport",
            ErrorKind::ResponseParse => "response_parse",
            ErrorKind::ModelReported => "model_reported",
        }
    }
}

/// 业务错误类型
///
/// 抓取、提示词构建、模型调用和响应校验各层之间传递的唯一错误类型。
/// `Display` 输出即为返回给客户端的错误消息，诊断信息通过 `detail()` 获取。
#[derive(Error, Debug)]
pub enum SeoError {
    /// 模型未配置（缺少 API 密钥）
    #[error("{0}")]
    Configuration(String),

    /// robots.txt 禁止抓取
    #[error("Scraping disallowed by robots.txt")]
    PolicyDenied,

    /// 页面抓取网络错误
    #[error(transparent)]
    Network(#[from] FetchError),

    /// 请求参数无效
    #[error("{0}")]
    InvalidInput(String),

    /// 缺少必需的输入
    #[error("{0}")]
    MissingInput(String),

    /// 不支持的社交平台
    #[error("Unsupported social platform: {0}")]
    UnsupportedPlatform(String),

    /// 模型没有返回候选结果（通常被安全策略拦截）
    #[error("AI Error: AI response blocked or empty.")]
    ModelBlocked { details: String },

    /// 模型返回了候选结果但没有文本
    #[error("AI Error: AI generated empty or non-text response.")]
    ModelEmpty,

    /// 模型调用失败（重试耗尽或不可重试）
    #[error("{0}")]
    ModelTransport(String),

    /// 模型输出不是合法的 JSON 对象
    #[error("Failed to parse AI response as JSON")]
    ResponseParse { raw_snippet: String },

    /// 模型输出的 JSON 自带 error 字段
    #[error("AI Error: {0}")]
    ModelReported(String),
}

impl SeoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SeoError::Configuration(_) => ErrorKind::Configuration,
            SeoError::PolicyDenied => ErrorKind::PolicyDenied,
            SeoError::Network(_) => ErrorKind::Network,
            SeoError::InvalidInput(_) => ErrorKind::InvalidInput,
            SeoError::MissingInput(_) => ErrorKind::MissingInput,
            SeoError::UnsupportedPlatform(_) => ErrorKind::UnsupportedPlatform,
            SeoError::ModelBlocked { .. } => ErrorKind::ModelBlocked,
            SeoError::ModelEmpty => ErrorKind::ModelEmpty,
            SeoError::ModelTransport(_) => ErrorKind::ModelTransport,
            SeoError::ResponseParse { .. } => ErrorKind::ResponseParse,
            SeoError::ModelReported(_) => ErrorKind::ModelReported,
        }
    }

    /// 附加诊断信息（不返回给客户端，仅用于日志）
    pub fn detail(&self) -> Option<&str> {
        match self {
            SeoError::ModelBlocked { details } => Some(details),
            SeoError::ResponseParse { raw_snippet } => Some(raw_snippet),
            _ => None,
        }
    }

    /// 是否由客户端请求或目标站点策略导致
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SeoError::PolicyDenied | SeoError::InvalidInput(_) | SeoError::MissingInput(_)
        )
    }

    pub fn model_not_configured() -> Self {
        SeoError::Configuration("AI Model not configured".to_string())
    }
}
