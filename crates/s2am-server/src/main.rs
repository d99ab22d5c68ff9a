//! splunk2alertmanager binary.
//!
//! Receives Splunk webhook alerts and forwards them to Alertmanager.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use s2am_server::{init_logging, shutdown_signal, Cli, RelayServer};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Cli::parse().into_config();

    if let Err(e) = init_logging(config.log_level, config.log_format) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.bind_addr,
        alertmanager_url = %config.alertmanager_url,
        "starting splunk2alertmanager"
    );

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "failed to start HTTP server");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: s2am_server::ServerConfig) -> anyhow::Result<()> {
    let server = RelayServer::new(config).context("invalid configuration")?;
    server
        .serve_with_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}
