//! Entry point: parse CLI and dispatch to command handlers.

use brtools::{cli::BrTools, commands::run, core::GatewayConfig, Result};
use clap::Parser;
use env_logger::Env;

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let app = BrTools::parse();
    let config = GatewayConfig::from_env()?;
    run(app, &config).await
}
