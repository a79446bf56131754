//! Module `commands`
//!
//! Defines the console commands that drive the file share and the parser
//! that turns an input line into one of them.

use crate::service::{Operation, ServiceCall};

/// A console command parsed from one input line.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Dispatch a share operation
    Call(ServiceCall),
    /// Re-read configuration and replace the store
    Reload,
    Help,
    Quit,
    /// Unknown command or missing argument, with a reason
    Invalid(String),
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    /// Bytes to write back, already terminated
    pub message: Vec<u8>,
}

/// Parses a raw input line into a `Command`.
///
/// The first word selects the command. For `upload_file` the second word is
/// the path and the remainder of the line, after a single separating space,
/// is the content, taken as raw bytes. Everything but upload content must be
/// valid UTF-8.
pub fn parse_command(raw: impl AsRef<[u8]>) -> Command {
    let mut line = raw.as_ref();
    while let [rest @ .., b'\r' | b'\n'] = line {
        line = rest;
    }
    let line = line.trim_ascii_start();
    let (cmd, rest) = match line.iter().position(|b| b.is_ascii_whitespace()) {
        Some(i) => (&line[..i], &line[i + 1..]),
        None => (line, &line[line.len()..]),
    };

    let cmd = match std::str::from_utf8(cmd) {
        Ok(cmd) => cmd,
        Err(_) => return Command::Invalid("command is not valid UTF-8".into()),
    };

    match cmd.to_ascii_lowercase().as_str() {
        "quit" | "q" | "exit" => return Command::Quit,
        "reload" => return Command::Reload,
        "help" | "?" => return Command::Help,
        "" => return Command::Invalid("empty command".into()),
        _ => {}
    }

    let operation = match cmd.parse::<Operation>() {
        Ok(operation) => operation,
        Err(e) => return Command::Invalid(e),
    };

    if operation == Operation::Upload {
        let rest = rest.trim_ascii_start();
        let (path, content) = match rest.iter().position(|&b| b == b' ') {
            Some(i) => (&rest[..i], &rest[i + 1..]),
            None => (rest, &rest[rest.len()..]),
        };
        return match std::str::from_utf8(path) {
            Ok("") => Command::Invalid(format!("{} requires a path", operation)),
            Ok(path) => Command::Call(ServiceCall::upload(path, content)),
            Err(_) => Command::Invalid("path is not valid UTF-8".into()),
        };
    }

    let path = match std::str::from_utf8(rest) {
        Ok(path) => path.trim(),
        Err(_) => return Command::Invalid("path is not valid UTF-8".into()),
    };

    match operation {
        // An omitted path lists the share root.
        Operation::List => Command::Call(ServiceCall::new(operation, path)),
        _ if path.is_empty() => Command::Invalid(format!("{} requires a path", operation)),
        _ => Command::Call(ServiceCall::new(operation, path)),
    }
}
