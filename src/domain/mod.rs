// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：抓取结果和提示词相关的数据结构
/// - 服务（services）：抓取、提取、提示词构建、模型调用和响应校验
///
/// 领域层不保存跨请求的状态，每个请求独立完成。
pub mod models;
pub mod services;
