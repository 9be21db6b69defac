use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::AppConfig;
use crate::garoon::GaroonClient;
use crate::mcp::McpServer;

pub async fn run() -> Result<()> {
    // Logs go to stderr; stdout carries the JSON-RPC stream.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env()?;
    let client = GaroonClient::new(&config)?;

    tracing::info!(base_url = %config.base_url, "starting stdio server");
    McpServer::new(client).run().await
}
