// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::settings::ScraperSettings;
use crate::domain::models::scrape_result::ScrapeResult;
use crate::domain::services::extraction_service::ExtractionService;
use crate::engines::reqwest_engine::{random_user_agent, ReqwestEngine};
use crate::engines::traits::{FetchError, ScrapeRequest, ScraperEngine};
use crate::engines::validators;
use crate::infrastructure::metrics::SCRAPES_TOTAL;
use crate::utils::errors::SeoError;
use crate::utils::robots::{RobotsChecker, RobotsCheckerTrait};

/// 抓取服务接口
#[async_trait]
pub trait ScrapeServiceTrait: Send + Sync {
    /// 抓取单个页面并提取 SEO 字段
    async fn scrape(&self, url: &str) -> Result<ScrapeResult, SeoError>;
}

/// 抓取服务
///
/// 依次执行：目标地址检查 → 选择 User-Agent → robots.txt 检查 → 抓取页面 → 字段提取。
/// robots 检查与页面请求使用同一个 User-Agent
pub struct ScrapeService {
    robots: Arc<dyn RobotsCheckerTrait>,
    engine: Arc<dyn ScraperEngine>,
    timeout: Duration,
    /// 为真时拒绝解析到私有地址的目标，在发出任何请求之前检查
    block_private_addresses: bool,
}

impl ScrapeService {
    pub fn new(
        robots: Arc<dyn RobotsCheckerTrait>,
        engine: Arc<dyn ScraperEngine>,
        timeout: Duration,
        block_private_addresses: bool,
    ) -> Self {
        Self {
            robots,
            engine,
            timeout,
            block_private_addresses,
        }
    }

    /// 使用默认的 robots 检查器和 reqwest 引擎
    ///
    /// # 错误
    /// * HTTP 客户端创建失败时返回 `Network(Request)`
    pub fn from_settings(settings: &ScraperSettings) -> Result<Self, SeoError> {
        let robots_client = validators::http_client(settings.block_private_addresses)
            .map_err(|e| FetchError::Request {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self::new(
            Arc::new(RobotsChecker::with_client(
                robots_client,
                Duration::from_secs(settings.robots_timeout_secs),
            )),
            Arc::new(ReqwestEngine::new(settings)?),
            Duration::from_secs(settings.request_timeout_secs),
            settings.block_private_addresses,
        ))
    }
}

#[async_trait]
impl ScrapeServiceTrait for ScrapeService {
    async fn scrape(&self, url: &str) -> Result<ScrapeResult, SeoError> {
        if self.block_private_addresses {
            if let Err(e) = validators::validate_url(url).await {
                warn!("Rejected target {}: {}", url, e);
                counter!(SCRAPES_TOTAL, "outcome" => "target_rejected").increment(1);
                return Err(FetchError::Request {
                    message: format!("target address rejected: {}", e),
                }
                .into());
            }
        }

        let user_agent = random_user_agent();

        if !self.robots.is_allowed(url, user_agent).await {
            warn!("Scraping disallowed by robots.txt for {}", url);
            counter!(SCRAPES_TOTAL, "outcome" => "policy_denied").increment(1);
            return Err(SeoError::PolicyDenied);
        }

        let request = ScrapeRequest {
            url: url.to_string(),
            user_agent: user_agent.to_string(),
            timeout: self.timeout,
        };

        let response = match self.engine.scrape(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Fetching {} with {} failed: {}", url, self.engine.name(), e);
                counter!(SCRAPES_TOTAL, "outcome" => "network_error").increment(1);
                return Err(e.into());
            }
        };

        info!(
            "Fetched {} ({} bytes, {} ms)",
            url,
            response.content.len(),
            response.response_time_ms
        );

        let result = ExtractionService::extract(&response.content, url);
        counter!(SCRAPES_TOTAL, "outcome" => "success").increment(1);
        Ok(result)
    }
}
