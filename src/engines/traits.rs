// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 页面抓取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// 超时
    #[error("Timeout scraping {url}")]
    Timeout { url: String },
    /// 非 2xx 状态码
    #[error("HTTP Error {code} for {url}")]
    HttpStatus { code: u16, url: String },
    /// 连接失败
    #[error("Connection error for {url}")]
    Connection { url: String },
    /// 其他传输错误
    #[error("Request error: {message}")]
    Request { message: String },
}

impl FetchError {
    /// 将 reqwest 错误归类
    pub fn classify(err: &reqwest::Error, url: &str) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if err.is_connect() {
            FetchError::Connection {
                url: url.to_string(),
            }
        } else if let Some(status) = err.status() {
            FetchError::HttpStatus {
                code: status.as_u16(),
                url: url.to_string(),
            }
        } else {
            FetchError::Request {
                message: err.to_string(),
            }
        }
    }
}

/// 抓取请求
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    /// 目标URL
    pub url: String,
    /// 本次抓取使用的 User-Agent（与 robots 检查保持一致）
    pub user_agent: String,
    /// 超时时间
    pub timeout: Duration,
}

/// 抓取响应
#[derive(Debug, Clone)]
pub struct ScrapeResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容
    pub content: String,
    /// 内容类型
    pub content_type: String,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

/// 抓取引擎特质
#[async_trait]
pub trait ScraperEngine: Send + Sync {
    /// 执行抓取
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, FetchError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
