// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const NO_TITLE: &str = "No Title Found";
pub const NO_META_DESCRIPTION: &str = "No Meta Description Found";
pub const NO_H1: &str = "No H1 Found";
pub const NO_MAIN_CONTENT: &str = "Could not identify main content area.";

/// 链接统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCounts {
    /// 与页面同主机的 http(s) 链接数
    pub internal_count: usize,
    /// 指向其他主机的 http(s) 链接数
    pub external_count: usize,
}

/// 单页面抓取结果
///
/// 每个请求创建一次，响应发送后即丢弃，不做持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    /// 页面URL
    pub url: String,
    /// 页面标题
    pub title: String,
    /// Meta描述
    pub meta_description: String,
    /// 第一个 H1
    pub h1: String,
    /// 各级标题，键为 `h1`..`h6`，没有标签的级别不出现
    pub headings: BTreeMap<String, Vec<String>>,
    /// 图片 alt 文本（最多 10 条，均非空）
    pub alt_texts: Vec<String>,
    /// JSON-LD 结构化数据块
    pub schema_blocks: Vec<Value>,
    /// 链接统计
    pub links: LinkCounts,
    /// 正文摘要（最多 5000 字符）
    pub content_snippet: String,
}
