// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务：
/// - 提取服务（extraction_service）：从 HTML 中提取 SEO 字段
/// - LLM服务（llm_service）：调用生成式模型并按策略重试
/// - 提示词服务（prompt_service）：把抓取结果或社交主题渲染为提示词
/// - 响应校验（response_validator）：把模型输出解析为 JSON
/// - 抓取服务（scrape_service）：robots 检查、页面抓取与字段提取
pub mod extraction_service;
pub mod llm_service;
pub mod prompt_service;
pub mod response_validator;
pub mod scrape_service;
