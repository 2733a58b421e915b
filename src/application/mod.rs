// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含请求数据传输对象和用例实现，
/// 负责把 HTTP 请求参数转换为领域服务调用
pub mod dto;
pub mod use_cases;
