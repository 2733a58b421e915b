// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心数据结构，包括：
/// - 抓取结果（scrape_result）：单页面提取出的 SEO 信号
/// - 提示词（prompt）：语言、社交平台、模板标识和提示词请求
pub mod prompt;
pub mod scrape_result;
