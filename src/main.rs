use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use class_chat::config::AppConfig;
use class_chat::infrastructure::AppContainer;
use class_chat::presentation::http::HttpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log.level.clone()));
    fmt().with_env_filter(filter).init();

    tracing::info!("Initializing application container...");
    let container = AppContainer::new(config).await?;

    tracing::info!("Starting HTTP server...");
    HttpServer::new(container).run().await
}
