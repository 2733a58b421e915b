// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;

pub const SCRAPES_TOTAL: &str = "shopseo_scrapes_total";
pub const LLM_CALLS_TOTAL: &str = "shopseo_llm_calls_total";
pub const LLM_RETRIES_TOTAL: &str = "shopseo_llm_retries_total";

/// 初始化指标系统
///
/// 未启用时什么也不做；监听地址无效或端口被占用时只记录警告，不影响服务启动
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.listen_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!(
                "Invalid metrics listen address '{}': {}",
                settings.listen_addr, e
            );
            return;
        }
    };

    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!(SCRAPES_TOTAL, "Single-page scrapes by outcome");
    describe_counter!(LLM_CALLS_TOTAL, "Model generations by outcome");
    describe_counter!(LLM_RETRIES_TOTAL, "Model calls retried after a transport failure");

    info!("Metrics exporter listening on {}", addr);
}
