//! Gridtoe binary entry point.

use anyhow::Result;
use clap::Parser;
use gridtoe::{Cli, run_tui, tui::init_file_logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    init_file_logging(config.log_file())?;
    info!(
        turn_seconds = config.turn_seconds(),
        theme = %config.theme(),
        "Configuration resolved"
    );

    run_tui(config, cli.size).await
}
