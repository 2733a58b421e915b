// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Gemini 生成式模型接入
///
/// - 报文类型（types）：`generateContent` 的请求与响应结构
/// - 客户端（client）：实现 `GenerativeModel` 的 HTTP 客户端
pub mod client;
pub mod types;

pub use client::GeminiClient;
