//! File system helpers
//!
//! Low-level I/O used by the store once a path has been resolved.

use std::fs::{self, DirEntry};
use std::io::{self, Write};
use std::path::Path;
use std::time::UNIX_EPOCH;

use tempfile::NamedTempFile;

use crate::storage::results::EntryDescriptor;

/// Write `content` to `target`, replacing any existing file.
///
/// Each call writes to its own temporary file in the target's directory and
/// renames it over the target, so readers see either the old file or one
/// complete new one. The temporary file is removed if anything fails.
pub fn write_replace(target: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match target.parent() {
        Some(dir) => dir,
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "upload target has no parent directory",
            ));
        }
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

/// Remove a file, or a directory together with all its descendants
pub fn remove_entry(path: &Path, is_directory: bool) -> io::Result<()> {
    if is_directory {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Describe a directory entry without following symlinks
pub fn describe_entry(entry: &DirEntry, parent_relative: &Path) -> io::Result<EntryDescriptor> {
    let metadata = entry.metadata()?;
    let name = entry.file_name().to_string_lossy().to_string();
    let is_directory = metadata.is_dir();
    let size_bytes = if is_directory { 0 } else { metadata.len() };
    let modified_time = metadata.modified().unwrap_or(UNIX_EPOCH);

    Ok(EntryDescriptor {
        relative_path: parent_relative.join(entry.file_name()),
        name,
        is_directory,
        size_bytes,
        modified_time,
    })
}
