use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod serve;

use crate::mcp::tools;

#[derive(Subcommand)]
enum Command {
    /// Run the MCP server over stdio
    Serve {},
    /// Print the tool catalog as JSON
    Tools {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {} => serve::run().await,
        Command::Tools {} => {
            println!("{}", serde_json::to_string_pretty(&tools::catalog())?);
            Ok(())
        }
    }
}
