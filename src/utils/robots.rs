// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use robotstxt::DefaultMatcher;
use std::time::Duration;
use url::Url;

/// Robots.txt检查器接口
#[async_trait]
pub trait RobotsCheckerTrait: Send + Sync {
    /// 检查URL是否被允许访问
    ///
    /// 任何获取或解析失败都按允许处理
    async fn is_allowed(&self, url_str: &str, user_agent: &str) -> bool;
}

/// robots.txt 获取结果
#[derive(Debug, PartialEq)]
enum RobotsPolicy {
    /// 需要按规则匹配的内容
    Rules(String),
    /// 全部允许
    AllowAll,
    /// 全部禁止
    DisallowAll,
}

/// Robots.txt检查器
///
/// 每次检查都重新获取 robots.txt，不缓存、不重试
#[derive(Clone)]
pub struct RobotsChecker {
    /// HTTP客户端
    client: Client,

    /// 请求超时
    timeout: Duration,
}

#[async_trait]
impl RobotsCheckerTrait for RobotsChecker {
    async fn is_allowed(&self, url_str: &str, user_agent: &str) -> bool {
        let robots_url = match robots_url(url_str) {
            Ok(robots_url) => robots_url,
            Err(e) => {
                tracing::warn!("Could not derive robots.txt URL for {}: {}", url_str, e);
                return true;
            }
        };

        match self.fetch_policy(&robots_url, user_agent).await {
            Ok(RobotsPolicy::AllowAll) => true,
            Ok(RobotsPolicy::DisallowAll) => false,
            Ok(RobotsPolicy::Rules(content)) => allowed_by_rules(&content, user_agent, url_str),
            Err(e) => {
                // Be optimistic when robots.txt is unreachable
                tracing::warn!(
                    "Could not read or parse robots.txt at {}: {}",
                    robots_url,
                    e
                );
                true
            }
        }
    }
}

impl Default for RobotsChecker {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl RobotsChecker {
    /// 创建新的Robots检查器实例
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(Client::new(), timeout)
    }

    /// 使用指定的 HTTP 客户端（例如带重定向检查的客户端）
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// 获取 robots.txt 并按状态码归类
    async fn fetch_policy(&self, robots_url: &str, user_agent: &str) -> Result<RobotsPolicy> {
        let resp = self
            .client
            .get(robots_url)
            .header(USER_AGENT, user_agent)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(RobotsPolicy::Rules(resp.text().await?));
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(RobotsPolicy::DisallowAll),
            s if s.is_client_error() => Ok(RobotsPolicy::AllowAll),
            s => Err(anyhow::anyhow!("Server error: {}", s)),
        }
    }
}

/// 由目标地址推导 robots.txt 地址
pub fn robots_url(url_str: &str) -> Result<String> {
    let url = Url::parse(url_str)?;
    let host = url
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid URL"))?;

    Ok(match url.port() {
        Some(port) => format!("{}://{}:{}/robots.txt", url.scheme(), host, port),
        None => format!("{}://{}/robots.txt", url.scheme(), host),
    })
}

/// User-Agent 的产品标识（第一个 `/` 之前的部分）
///
/// robots.txt 的 User-agent 行匹配的是产品标识而不是完整字符串
pub fn product_token(user_agent: &str) -> &str {
    user_agent
        .split('/')
        .next()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .unwrap_or("*")
}

fn allowed_by_rules(content: &str, user_agent: &str, url_str: &str) -> bool {
    let mut matcher = DefaultMatcher::default();
    matcher.one_agent_allowed_by_robots(content, product_token(user_agent), url_str)
}
