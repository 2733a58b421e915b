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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、页面抓取、LLM、会话和指标等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 页面抓取配置
    pub scraper: ScraperSettings,
    /// LLM配置
    pub llm: LlmSettings,
    /// 会话配置
    #[serde(default)]
    pub session: SessionSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 页面抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    /// 页面请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// robots.txt 请求超时时间（秒）
    pub robots_timeout_secs: u64,
    /// 礼貌延迟下限（毫秒）
    pub politeness_delay_min_ms: u64,
    /// 礼貌延迟上限（毫秒）
    pub politeness_delay_max_ms: u64,
    /// 是否拒绝解析到私有地址的目标
    pub block_private_addresses: bool,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: 20,
            robots_timeout_secs: 10,
            politeness_delay_min_ms: 1000,
            politeness_delay_max_ms: 2500,
            block_private_addresses: true,
        }
    }
}

/// LLM配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// API密钥，未设置时所有 AI 接口返回配置错误
    pub api_key: Option<String>,
    /// 模型名称
    pub model: String,
    /// API基础URL
    pub api_base_url: String,
    /// 生成温度
    pub temperature: f32,
    /// 最大重试次数
    pub max_retries: u32,
    /// 首次重试前的等待时间（秒），之后每次翻倍
    pub initial_retry_delay_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-flash-latest".to_string(),
            api_base_url: "https://generativelanguage.googleapis.com".to_string(),
            temperature: 0.7,
            max_retries: 2,
            initial_retry_delay_secs: 5,
        }
    }
}

/// 会话配置设置
#[derive(Debug, Default, Deserialize)]
pub struct SessionSettings {
    /// 会话签名密钥
    pub secret: Option<String>,
}

impl SessionSettings {
    /// 返回配置的会话密钥；未配置时生成一个 32 位十六进制的临时密钥
    pub fn resolve_secret(&self) -> String {
        match self.secret.as_deref().map(str::trim) {
            Some(secret) if !secret.is_empty() => secret.to_string(),
            _ => {
                tracing::warn!("SESSION_SECRET_KEY not set. Using a temporary key.");
                hex::encode(rand::random::<[u8; 16]>())
            }
        }
    }
}

/// 指标配置设置
#[derive(Debug, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、配置文件和 `SHOPSEO__` 前缀的环境变量，
    /// 最后应用 `GEMINI_API_KEY` 与 `SESSION_SECRET_KEY`
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let scraper = ScraperSettings::default();
        let llm = LlmSettings::default();

        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5001)?
            // Default scraper settings
            .set_default("scraper.request_timeout_secs", scraper.request_timeout_secs as i64)?
            .set_default("scraper.robots_timeout_secs", scraper.robots_timeout_secs as i64)?
            .set_default(
                "scraper.politeness_delay_min_ms",
                scraper.politeness_delay_min_ms as i64,
            )?
            .set_default(
                "scraper.politeness_delay_max_ms",
                scraper.politeness_delay_max_ms as i64,
            )?
            .set_default(
                "scraper.block_private_addresses",
                scraper.block_private_addresses,
            )?
            // Default LLM settings
            .set_default("llm.model", llm.model)?
            .set_default("llm.api_base_url", llm.api_base_url)?
            .set_default("llm.temperature", llm.temperature as f64)?
            .set_default("llm.max_retries", llm.max_retries as i64)?
            .set_default("llm.initial_retry_delay_secs", llm.initial_retry_delay_secs as i64)?
            // Default metrics settings
            .set_default("metrics.enabled", true)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SHOPSEO").separator("__"))
            .set_override_option("llm.api_key", non_empty_env("GEMINI_API_KEY"))?
            .set_override_option("session.secret", non_empty_env("SESSION_SECRET_KEY"))?;

        builder.build()?.try_deserialize()
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
