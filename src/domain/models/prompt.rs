// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;
use std::str::FromStr;

use crate::domain::models::scrape_result::ScrapeResult;
use crate::utils::errors::SeoError;

/// 输出语言
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    Romanian,
}

impl Language {
    /// 解析请求中的语言代码
    ///
    /// 缺省为英语；不认识的代码同样回退到英语
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(|c| c.trim().to_ascii_lowercase()) {
            None => Language::English,
            Some(c) if c.is_empty() || c == "en" => Language::English,
            Some(c) if c == "ro" => Language::Romanian,
            Some(other) => {
                tracing::warn!("Unsupported language code '{}', using English", other);
                Language::English
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Romanian => "ro",
        }
    }

    /// 写入提示词的语言名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Romanian => "Romanian",
        }
    }
}

/// 社交平台
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Youtube,
    Instagram,
    Pinterest,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Pinterest => "pinterest",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = SeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "youtube" => Ok(Platform::Youtube),
            "instagram" => Ok(Platform::Instagram),
            "pinterest" => Ok(Platform::Pinterest),
            _ => Err(SeoError::UnsupportedPlatform(s.to_string())),
        }
    }
}

/// 提示词模板标识
///
/// 文本形式为 `shopify_seo` 或 `social:<platform>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseCase {
    ShopifySeo,
    Social(Platform),
}

impl FromStr for UseCase {
    type Err = SeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "shopify_seo" {
            return Ok(UseCase::ShopifySeo);
        }
        match s.strip_prefix("social:") {
            Some(platform) => Ok(UseCase::Social(platform.parse()?)),
            None => Err(SeoError::InvalidInput(format!(
                "Unknown prompt template: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UseCase::ShopifySeo => f.write_str("shopify_seo"),
            UseCase::Social(platform) => write!(f, "social:{}", platform),
        }
    }
}

/// 一次提示词构建请求，仅在单次调用期间存在
#[derive(Debug, Clone, Copy)]
pub enum PromptRequest<'a> {
    ShopifySeo {
        page: &'a ScrapeResult,
        language: Language,
    },
    Social {
        platform: Platform,
        topic: &'a str,
        keywords: Option<&'a str>,
        language: Language,
    },
}

impl PromptRequest<'_> {
    pub fn use_case(&self) -> UseCase {
        match self {
            PromptRequest::ShopifySeo { .. } => UseCase::ShopifySeo,
            PromptRequest::Social { platform, .. } => UseCase::Social(*platform),
        }
    }
}
