// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含请求数据传输对象和用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含抓取结果、提示词模型以及抓取、提取、提示词和模型调用等领域服务
pub mod domain;

/// 引擎模块
///
/// 实现单页面抓取引擎和目标地址校验
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成，如 Gemini 模型接入和指标导出
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和错误映射
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
