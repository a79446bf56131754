//! Storage result types
//!
//! Defines result structures returned by storage operations.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// One direct child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDescriptor {
    pub name: String,
    /// Path relative to the share root
    pub relative_path: PathBuf,
    pub is_directory: bool,
    /// Size in bytes, 0 for directories
    pub size_bytes: u64,
    pub modified_time: SystemTime,
}

impl EntryDescriptor {
    /// Modification time as whole seconds since the Unix epoch (0 if earlier)
    pub fn modified_secs(&self) -> u64 {
        self.modified_time
            .duration_since(UNIX_EPOCH)
            .map(|dur| dur.as_secs())
            .unwrap_or(0)
    }
}
