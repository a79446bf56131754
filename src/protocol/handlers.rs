//! Command handlers for the file share console.
//!
//! Dispatches parsed commands to the service and renders the outcome.

use log::{error, info};

use crate::config::ShareConfig;
use crate::error::FileShareError;
use crate::protocol::responses::{
    format_content, format_error, format_invalid, format_listing, format_ok,
};
use crate::protocol::{Command, CommandResult, CommandStatus};
use crate::service::{FileShare, Operation, ServiceCall, ServiceResponse};

const HELP: &str = "\
commands:
  list_files [path]
  upload_file <path> [content]
  download_file <path>
  delete_file <path>
  create_directory <path>
  reload
  quit
";

/// Dispatches a parsed command.
///
/// `config_path` is the configuration file stem re-read on `reload`.
pub async fn handle_command(
    share: &FileShare,
    command: Command,
    config_path: &str,
) -> CommandResult {
    match command {
        Command::Call(call) => handle_call(share, call).await,
        Command::Reload => handle_reload(share, config_path).await,
        Command::Help => CommandResult {
            status: CommandStatus::Success,
            message: HELP.as_bytes().to_vec(),
        },
        Command::Quit => CommandResult {
            status: CommandStatus::CloseConnection,
            message: b"OK bye\n".to_vec(),
        },
        Command::Invalid(reason) => CommandResult {
            message: format_invalid(&reason),
            status: CommandStatus::Failure(reason),
        },
    }
}

async fn handle_call(share: &FileShare, call: ServiceCall) -> CommandResult {
    let operation: Operation = call.operation;

    match share.call(call).await {
        Ok(response) => CommandResult {
            status: CommandStatus::Success,
            message: match response {
                ServiceResponse::Files(entries) => format_listing(&entries),
                ServiceResponse::Content(content) => format_content(&content),
                ServiceResponse::Done => format_ok(),
            },
        },
        Err(e) => CommandResult {
            message: format_error(&e),
            status: CommandStatus::Failure(format!("{} failed: {}", operation, e.code())),
        },
    }
}

async fn handle_reload(share: &FileShare, config_path: &str) -> CommandResult {
    let config = match ShareConfig::load_from(config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to reload configuration: {}", e);
            let err = FileShareError::from(e);
            return CommandResult {
                message: format_error(&err),
                status: CommandStatus::Failure("reload failed".into()),
            };
        }
    };

    match share.reconfigure(config).await {
        Ok(()) => {
            info!("Configuration reloaded");
            CommandResult {
                status: CommandStatus::Success,
                message: format_ok(),
            }
        }
        Err(e) => {
            error!("Failed to apply configuration: {}", e);
            CommandResult {
                message: format_error(&e),
                status: CommandStatus::Failure("reload failed".into()),
            }
        }
    }
}
