// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::prompt::Language;
use crate::utils::errors::SeoError;

/// 社交媒体内容生成请求数据传输对象
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GenerateSocialRequestDto {
    /// 目标平台（youtube / instagram / pinterest）
    pub platform: Option<String>,
    /// 主题或产品描述
    pub topic: Option<String>,
    /// 可选关键词
    pub keywords: Option<String>,
    /// 输出语言代码，缺省为英语
    pub language: Option<String>,
}

impl GenerateSocialRequestDto {
    pub fn platform(&self) -> Result<&str, SeoError> {
        required(&self.platform, "Missing 'platform' parameter")
    }

    pub fn topic(&self) -> Result<&str, SeoError> {
        required(&self.topic, "Missing 'topic' or description parameter")
    }

    pub fn keywords(&self) -> Option<&str> {
        self.keywords.as_deref()
    }

    pub fn language(&self) -> Language {
        Language::from_code(self.language.as_deref())
    }
}

fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, SeoError> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SeoError::MissingInput(message.to_string()))
}
