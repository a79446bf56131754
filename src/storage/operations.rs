//! Storage operations
//!
//! The scoped file store: list, upload, download, delete and create-directory,
//! each confined to the share root and gated by the share permissions.

use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::ShareConfig;
use crate::error::StorageError;
use crate::storage::filesystem::{describe_entry, remove_entry, write_replace};
use crate::storage::permissions::{Capability, Permissions};
use crate::storage::results::EntryDescriptor;
use crate::storage::validation::{ResolvedPath, resolve_no_follow, resolve_path};

/// A file store scoped to one root directory.
///
/// Root and permissions are fixed at construction. Changing either means
/// building a new `Store`.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
    permissions: Permissions,
}

impl Store {
    /// Create a store rooted at `root`, creating the directory if it is absent
    pub fn new(root: impl AsRef<Path>, permissions: Permissions) -> Result<Self, StorageError> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;
        let root = root.canonicalize()?;
        if !root.is_dir() {
            return Err(StorageError::InvalidTarget(root.display().to_string()));
        }

        info!(
            "Share root {} (read: {}, write: {}, delete: {})",
            root.display(),
            permissions.read,
            permissions.write,
            permissions.delete
        );

        Ok(Self { root, permissions })
    }

    pub fn from_config(config: &ShareConfig) -> Result<Self, StorageError> {
        Self::new(config.share_path(), config.permissions)
    }

    /// Canonical root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    pub fn resolve(&self, logical: &str) -> Result<ResolvedPath, StorageError> {
        resolve_path(&self.root, logical)
    }

    /// Lists the direct children of a directory
    pub fn list(&self, path: &str) -> Result<Vec<EntryDescriptor>, StorageError> {
        let target = self.resolve(path)?;
        if !target.exists() || !target.real().is_dir() {
            return Err(StorageError::NotFound(path.to_string()));
        }

        let entries = fs::read_dir(target.real()).map_err(|e| not_found_or_io(e, path))?;

        let mut listing = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry in {:?}: {}", path, e);
                    continue;
                }
            };
            match describe_entry(&entry, target.relative()) {
                Ok(descriptor) => listing.push(descriptor),
                // Removed between read_dir and stat.
                Err(e) => debug!("Skipping {:?} in {:?}: {}", entry.file_name(), path, e),
            }
        }

        info!(
            "Listed {:?} (real: {}) - {} entries",
            path,
            target.real().display(),
            listing.len()
        );

        Ok(listing)
    }

    /// Writes `content` to a file, creating parent directories and replacing
    /// any existing file
    pub fn upload(&self, path: &str, content: &[u8]) -> Result<(), StorageError> {
        self.permissions.require(Capability::Write)?;
        let target = self.resolve(path)?;

        if target.is_root() || target.names_directory() || target.real().is_dir() {
            return Err(StorageError::InvalidTarget(path.to_string()));
        }

        if let Some(parent) = target.real().parent() {
            fs::create_dir_all(parent)?;
        }
        write_replace(target.real(), content)?;

        info!(
            "Uploaded {:?} (real: {}) - {} bytes",
            path,
            target.real().display(),
            content.len()
        );

        Ok(())
    }

    /// Reads the full content of a regular file
    pub fn download(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.permissions.require(Capability::Read)?;
        let target = self.resolve(path)?;

        if !target.exists() {
            return Err(StorageError::NotFound(path.to_string()));
        }
        if !target.real().is_file() {
            return Err(StorageError::InvalidTarget(path.to_string()));
        }

        let content = fs::read(target.real()).map_err(|e| not_found_or_io(e, path))?;

        info!(
            "Downloaded {:?} (real: {}) - {} bytes",
            path,
            target.real().display(),
            content.len()
        );

        Ok(content)
    }

    /// Deletes a file, or a directory with everything beneath it. A symlink
    /// is removed itself, never its target.
    ///
    /// The share root can never be deleted, whatever the permissions say.
    pub fn delete(&self, path: &str) -> Result<(), StorageError> {
        let target = resolve_no_follow(&self.root, path)?;
        if target.is_root() {
            return Err(StorageError::AccessDenied(path.to_string()));
        }
        self.permissions.require(Capability::Delete)?;

        if !target.exists() {
            return Err(StorageError::NotFound(path.to_string()));
        }

        let metadata =
            fs::symlink_metadata(target.real()).map_err(|e| not_found_or_io(e, path))?;
        remove_entry(target.real(), metadata.is_dir()).map_err(|e| not_found_or_io(e, path))?;

        info!(
            "Deleted {} {:?} (real: {})",
            if target.is_symlink() {
                "symlink"
            } else if metadata.is_dir() {
                "directory"
            } else {
                "file"
            },
            path,
            target.real().display()
        );

        Ok(())
    }

    /// Creates a directory and any missing parents. Succeeds if it already exists.
    pub fn create_directory(&self, path: &str) -> Result<(), StorageError> {
        self.permissions.require(Capability::Write)?;
        let target = self.resolve(path)?;

        if target.exists() {
            if target.real().is_dir() {
                debug!("Directory {:?} already exists", path);
                return Ok(());
            }
            return Err(StorageError::InvalidTarget(path.to_string()));
        }

        fs::create_dir_all(target.real())?;

        info!(
            "Created directory {:?} (real: {})",
            path,
            target.real().display()
        );

        Ok(())
    }
}

/// The target vanished between the existence check and the action
fn not_found_or_io(error: io::Error, path: &str) -> StorageError {
    if error.kind() == io::ErrorKind::NotFound {
        StorageError::NotFound(path.to_string())
    } else {
        StorageError::Io(error)
    }
}
