//! Console response formatting
//!
//! Renders service results and errors as terminated lines.

use crate::error::FileShareError;
use crate::storage::EntryDescriptor;

pub const OK: &str = "OK";
pub const ERR: &str = "ERR";

/// Format a bare success line
pub fn format_ok() -> Vec<u8> {
    format!("{}\n", OK).into_bytes()
}

/// Format a failure as `ERR <code> <message>`
pub fn format_error(err: &FileShareError) -> Vec<u8> {
    format!("{} {} {}\n", ERR, err.code(), err).into_bytes()
}

/// Format an invalid command
pub fn format_invalid(reason: &str) -> Vec<u8> {
    format!("{} invalid_command {}\n", ERR, reason).into_bytes()
}

/// Format a listing: a header line, then `d|f name size mtime` per entry
pub fn format_listing(entries: &[EntryDescriptor]) -> Vec<u8> {
    let mut out = format!("{} {} entries\n", OK, entries.len());
    for entry in entries {
        out.push_str(&format!(
            "{} {} {} {}\n",
            if entry.is_directory { 'd' } else { 'f' },
            entry.name,
            entry.size_bytes,
            entry.modified_secs()
        ));
    }
    out.into_bytes()
}

/// Format downloaded content: a header with the byte count, then the raw bytes
pub fn format_content(content: &[u8]) -> Vec<u8> {
    let mut out = format!("{} {} bytes\n", OK, content.len()).into_bytes();
    out.extend_from_slice(content);
    out.push(b'\n');
    out
}
