// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层单元测试
///
/// 使用 wiremock 验证 Gemini 请求报文和错误归类
pub mod gemini_client_test;
