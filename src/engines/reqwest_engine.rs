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

use crate::config::settings::ScraperSettings;
use crate::engines::traits::{FetchError, ScrapeRequest, ScrapeResponse, ScraperEngine};
use crate::engines::validators;
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// 桌面浏览器 User-Agent 池
pub const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/14.1.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.101 Safari/537.36",
];

/// 从 User-Agent 池中均匀随机选择一个
pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// 抓取引擎
///
/// 基于reqwest实现的单页面抓取引擎：请求前随机等待一段礼貌延迟，
/// 只发出一次 GET 请求，不做重试
pub struct ReqwestEngine {
    client: reqwest::Client,
    /// 礼貌延迟下限（毫秒）
    delay_min_ms: u64,
    /// 礼貌延迟上限（毫秒）
    delay_max_ms: u64,
    /// 是否拒绝私有地址
    block_private_addresses: bool,
}

impl ReqwestEngine {
    /// 创建引擎；启用私有地址拦截时客户端会拒绝跳转到私有地址的重定向
    pub fn new(settings: &ScraperSettings) -> Result<Self, FetchError> {
        let client = validators::http_client(settings.block_private_addresses).map_err(|e| {
            FetchError::Request {
                message: format!("failed to build HTTP client: {}", e),
            }
        })?;

        Ok(Self {
            client,
            delay_min_ms: settings.politeness_delay_min_ms,
            delay_max_ms: settings.politeness_delay_max_ms,
            block_private_addresses: settings.block_private_addresses,
        })
    }

    /// 计算本次请求前的礼貌延迟
    fn politeness_delay(&self) -> Duration {
        if self.delay_max_ms <= self.delay_min_ms {
            return Duration::from_millis(self.delay_min_ms);
        }
        Duration::from_millis(rand::random_range(self.delay_min_ms..=self.delay_max_ms))
    }
}

#[async_trait]
impl ScraperEngine for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeResponse)` - 2xx 响应
    /// * `Err(FetchError)` - 超时、非 2xx 状态码、连接失败或其他传输错误
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, FetchError> {
        if self.block_private_addresses {
            validators::validate_url(&request.url)
                .await
                .map_err(|e| FetchError::Request {
                    message: format!("target address rejected: {}", e),
                })?;
        }

        let delay = self.politeness_delay();
        debug!("Waiting {:?} before fetching {}", delay, request.url);
        tokio::time::sleep(delay).await;

        let start = Instant::now();
        let response = self
            .client
            .get(&request.url)
            .header(USER_AGENT, &request.user_agent)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| FetchError::classify(&e, &request.url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                code: status.as_u16(),
                url: request.url.clone(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if !content_type.to_lowercase().contains("text/html") {
            // Parsing still proceeds; the extractor tolerates any markup
            warn!(
                "Content-Type is not HTML ({}) for {}",
                content_type, request.url
            );
        }

        let content = response
            .text()
            .await
            .map_err(|e| FetchError::classify(&e, &request.url))?;

        Ok(ScrapeResponse {
            status_code: status.as_u16(),
            content,
            content_type,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
