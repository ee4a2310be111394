//! Binary crate for the `weather-mcp` tool server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Serving the `get_weather` tool over MCP stdio
//! - Interactive configuration

use clap::Parser;

mod cli;
mod logging;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
