use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use teloxide::Bot;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use pulsebot::channels::{run_dispatcher, set_commands};
use pulsebot::config::LogFormat;
use pulsebot::heartbeat::HeartbeatService;
use pulsebot::Config;

/// Configuration comes from the environment (TELOXIDE_TOKEN, OWNER_ID,
/// HEARTBEAT_INTERVAL_SECS, HEARTBEAT_RETRY_SECS, LOG_FORMAT, RUST_LOG).
#[derive(Parser)]
#[command(name = "pulsebot", version)]
#[command(about = "Telegram bot that answers /start and sends an owner heartbeat", long_about = None)]
struct Cli {}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    let config = Config::from_env();
    init_logging(
        config
            .as_ref()
            .map(|config| config.log_format)
            .unwrap_or_default(),
    );
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Err(e).context("Failed to load configuration");
        }
    };

    run(config).await;
    Ok(())
}

async fn run(config: Config) {
    info!("pulsebot {} starting", env!("CARGO_PKG_VERSION"));
    let bot = Bot::new(config.token.clone());

    if let Err(e) = set_commands(&bot).await {
        warn!("Failed to publish bot commands: {}", e);
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let heartbeat = HeartbeatService::new(config.owner_id, config.heartbeat, Arc::new(bot.clone()))
        .start(shutdown_rx.clone());

    let signal_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl-C, shutting down"),
            Err(e) => {
                error!("Failed to listen for Ctrl-C: {}", e);
                return;
            }
        }
        let _ = signal_tx.send(true);
    });

    run_dispatcher(bot, shutdown_rx).await;

    // The dispatcher can also stop on its own; take the heartbeat down with it.
    let _ = shutdown_tx.send(true);
    if let Err(e) = heartbeat.await {
        error!("Heartbeat task ended abnormally: {}", e);
    }
    info!("pulsebot stopped");
}
