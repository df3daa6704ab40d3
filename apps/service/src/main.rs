mod config;
mod escalation;
mod monitoring;
mod service;
mod validation;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::service::PingerService;

/// Host reachability monitor with command escalation
#[derive(Debug, Parser)]
#[command(name = "vakt", version, about)]
struct Cli {
    /// Path to the configuration file (defaults to the XDG config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    info!("vakt service starting");
    info!("loading configuration");

    let config = match Config::from_config(cli.config.as_deref()).and_then(Config::validate) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            error!("service cannot continue without a valid monitor configuration");
            return ExitCode::FAILURE;
        }
    };

    let service = match PingerService::new(config) {
        Ok(service) => service,
        Err(e) => {
            error!("failed to initialize prober: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {e}");
        } else {
            info!("ctrl-c received, requesting shutdown");
        }
        let _ = shutdown_tx.send(true);
    });

    match service.run(shutdown_rx).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("monitor loop failed: {e}");
            ExitCode::FAILURE
        }
    }
}
