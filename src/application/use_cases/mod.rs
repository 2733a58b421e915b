// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 用例模块
///
/// 每个用例对应一个 API 接口的完整业务流程
pub mod seo_use_case;
pub mod social_use_case;
