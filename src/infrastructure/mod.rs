// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - Gemini（gemini）：生成式模型的 HTTP 接入
/// - 指标（metrics）：Prometheus 指标导出
pub mod gemini;
pub mod metrics;
