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

use shopseo::config::settings::Settings;
use shopseo::domain::services::llm_service::{LLMService, LLMServiceTrait};
use shopseo::domain::services::scrape_service::{ScrapeService, ScrapeServiceTrait};
use shopseo::infrastructure::metrics;
use shopseo::presentation::routes;
use shopseo::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting shopseo...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // No route reads the session, so the secret is only resolved to report a missing key
    settings.session.resolve_secret();

    // 3. Initialize Prometheus Metrics
    metrics::init_metrics(&settings.metrics);

    // 4. Initialize services
    let scrape_service: Arc<dyn ScrapeServiceTrait> =
        Arc::new(ScrapeService::from_settings(&settings.scraper)?);

    let llm_service: Option<Arc<dyn LLMServiceTrait>> =
        match LLMService::from_settings(&settings.llm) {
            Ok(service) => Some(Arc::new(service)),
            Err(e) => {
                warn!("AI endpoints are disabled: {}", e);
                None
            }
        };

    // 5. Start HTTP server
    let app = routes::routes(scrape_service, llm_service);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
