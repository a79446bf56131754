//! Console session
//!
//! Reads command lines from an input stream, dispatches them to the share and
//! writes each response back.

use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::protocol::{CommandStatus, handle_command, parse_command};
use crate::service::FileShare;

pub const MAX_COMMAND_LENGTH: usize = 64 * 1024;

/// Handles one console session until `quit` or end of input.
///
/// - Uses BufReader to read command lines.
/// - Rejects lines longer than `MAX_COMMAND_LENGTH` without dispatching them.
/// - `config_path` is re-read by the `reload` command.
pub async fn run_console<R, W>(
    share: &FileShare,
    input: R,
    mut output: W,
    config_path: &str,
) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(input);
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            info!("Console input closed");
            break;
        }

        if line.len() > MAX_COMMAND_LENGTH {
            warn!("Rejected command of {} bytes", line.len());
            output.write_all(b"ERR invalid_command command too long\n").await?;
            output.flush().await?;
            continue;
        }

        let command = parse_command(&line);
        debug!("Received: {:?}", command);

        let result = handle_command(share, command, config_path).await;
        output.write_all(&result.message).await?;
        output.flush().await?;

        if result.status == CommandStatus::CloseConnection {
            info!("Console session ended by quit");
            break;
        }
    }

    Ok(())
}
