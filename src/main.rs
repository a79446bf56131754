//! File Share - Entry Point
//!
//! Serves a sandboxed share directory through a line-oriented console on stdin.

use log::{error, info};
use std::process::ExitCode;

use fileshare::config::{DEFAULT_CONFIG_FILE, ShareConfig};
use fileshare::console::run_console;
use fileshare::service::FileShare;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

    let config = match ShareConfig::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {}", config_path, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Launching file share on {}...", config.share_path);

    let share = match FileShare::from_config(config).await {
        Ok(share) => share,
        Err(e) => {
            error!("Failed to open share: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run_console(&share, tokio::io::stdin(), tokio::io::stdout(), &config_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Console failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
