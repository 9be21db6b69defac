use anyhow::Result;
use garoon_mcp::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
