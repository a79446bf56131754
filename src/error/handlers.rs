//! Error handlers
//!
//! Logs failures at a level matching how serious each kind is.

use log::{debug, error, info, warn};

use crate::error::types::{FileShareError, StorageError};

/// Log a storage error raised by `operation` on the logical `path`
pub fn handle_storage_error(operation: &str, path: &str, err: &StorageError) {
    match err {
        StorageError::AccessDenied(_) => {
            warn!("SECURITY: {} rejected for path {:?}: {}", operation, path, err)
        }
        StorageError::PermissionDenied(_) => info!("{} refused for {:?}: {}", operation, path, err),
        StorageError::NotFound(_) | StorageError::InvalidTarget(_) => {
            debug!("{} failed for {:?}: {}", operation, path, err)
        }
        StorageError::Io(_) => error!("{} failed for {:?}: {}", operation, path, err),
    }
}

/// Log a service error
pub fn handle_error(operation: &str, path: &str, err: &FileShareError) {
    match err {
        FileShareError::Storage(e) => handle_storage_error(operation, path, e),
        other => error!("{} failed for {:?}: {}", operation, path, other),
    }
}
