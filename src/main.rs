use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sga::cli::{check_config, run_command, Cli, Commands, ConfigCommands};
use sga::config::Config;
use sga::AppState;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Commands::Config(ConfigCommands::Check) = &cli.command {
        check_config(&cli.config)?;
        return Ok(ExitCode::SUCCESS);
    }

    // Load configuration
    let mut config = Config::load(&cli.config)?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    // Initialize logging
    let log_level = cli
        .log_level
        .as_ref()
        .unwrap_or(&config.logging.level)
        .clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(
        api = %config.api.base_url,
        "Starting sga v{}",
        env!("CARGO_PKG_VERSION")
    );

    let app = AppState::open(config, cli.token.clone())?;
    run_command(&cli, &app).await
}
