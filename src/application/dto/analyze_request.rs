// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::prompt::Language;
use crate::utils::errors::SeoError;

/// 店铺 SEO 分析请求数据传输对象
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AnalyzeShopifyRequestDto {
    /// 要分析的页面URL，必须以 `http://` 或 `https://` 开头
    pub url: Option<String>,
    /// 输出语言代码（`en` / `ro`），缺省为英语
    pub language: Option<String>,
}

impl AnalyzeShopifyRequestDto {
    /// 校验并返回目标URL
    pub fn target_url(&self) -> Result<&str, SeoError> {
        match self.url.as_deref() {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => Ok(url),
            _ => Err(SeoError::InvalidInput(
                "Invalid or missing 'url' parameter".to_string(),
            )),
        }
    }

    pub fn language(&self) -> Language {
        Language::from_code(self.language.as_deref())
    }
}
