// src/main.rs
mod app;
mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, is_config_command, is_preferences_command};
use padel_slots::config::Config;
use padel_slots::error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    commands::validate_args(&args)?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let (log_file_path, _guard) = logging::setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if args.list_config {
        return commands::handle_list_config_command().await;
    }

    if is_config_command(&args) || is_preferences_command(&args) {
        if is_config_command(&args) {
            commands::handle_config_update_command(&args).await?;
        }
        if is_preferences_command(&args) {
            commands::handle_preferences_command(&args).await?;
        }
        return Ok(());
    }

    // Load config first to fail early if there's an issue
    let config = Config::load().await?;

    if args.once {
        app::run_once(&args, &config).await
    } else {
        app::run_server(&args, &config).await
    }
}
