use anyhow::Result;
use clap::Parser;
use core_logic::setup_logger;
use farcaster_bot::{runner, FarcasterConfig, FarcasterSession};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional TOML file overriding the built-in settings
    #[arg(short, long)]
    config: Option<String>,
    /// Write the run summary as JSON to this path
    #[arg(short, long)]
    export_summary: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = setup_logger("farcaster-bot");

    let args = Args::parse();

    let config = match args.config.as_deref() {
        Some(path) => {
            info!("Loading config from: {}", path);
            match FarcasterConfig::load(path) {
                Ok(c) => c,
                Err(e) => {
                    error!("Failed to load config: {:#}", e);
                    return Ok(());
                }
            }
        }
        None => FarcasterConfig::default(),
    };

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Ok(());
    }

    let user_agent = config.user_agent.clone();
    let timeout = config.request_timeout();

    let summary = match runner::run(&config, |credential| {
        FarcasterSession::new(credential, &user_agent, timeout)
    })
    .await
    {
        Ok(summary) => summary,
        Err(e) => {
            error!("Run aborted: {:#}", e);
            return Ok(());
        }
    };

    if let Some(path) = args.export_summary {
        match tokio::fs::write(&path, summary.to_json()).await {
            Ok(_) => info!("Run summary exported to {}", path),
            Err(e) => error!("Failed to export run summary: {}", e),
        }
    }

    Ok(())
}
