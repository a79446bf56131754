//! Error types
//!
//! Defines the typed failures returned by the file store and the service layer.

use std::fmt;
use std::io;

use crate::storage::permissions::Capability;

/// Fieldless discriminant of a [`StorageError`], for hosts that branch on kind only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AccessDenied,
    PermissionDenied,
    NotFound,
    InvalidTarget,
    IoFailure,
}

impl ErrorKind {
    /// Stable string tag for this kind
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::AccessDenied => "access_denied",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidTarget => "invalid_target",
            ErrorKind::IoFailure => "io_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    /// The path resolves outside the share root, or targets the root for deletion.
    AccessDenied(String),
    /// The capability flag gating the operation is off.
    PermissionDenied(Capability),
    NotFound(String),
    /// The target exists but is the wrong kind of entry.
    InvalidTarget(String),
    Io(io::Error),
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::AccessDenied(_) => ErrorKind::AccessDenied,
            StorageError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            StorageError::NotFound(_) => ErrorKind::NotFound,
            StorageError::InvalidTarget(_) => ErrorKind::InvalidTarget,
            StorageError::Io(_) => ErrorKind::IoFailure,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::AccessDenied(p) => write!(f, "Access denied: {}", p),
            StorageError::PermissionDenied(c) => write!(f, "{} permission denied", c),
            StorageError::NotFound(p) => write!(f, "Not found: {}", p),
            StorageError::InvalidTarget(p) => write!(f, "Invalid target: {}", p),
            StorageError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::Io(error)
    }
}

/// Service-level error that carries storage failures through unmodified
#[derive(Debug)]
pub enum FileShareError {
    Storage(StorageError),
    Config(config::ConfigError),
    /// A blocking worker task panicked or was aborted before producing a result.
    Worker(String),
}

impl FileShareError {
    /// The storage error, when this failure came from the store itself
    pub fn as_storage(&self) -> Option<&StorageError> {
        match self {
            FileShareError::Storage(e) => Some(e),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            FileShareError::Storage(e) => e.code(),
            FileShareError::Config(_) => "config_error",
            FileShareError::Worker(_) => "worker_failure",
        }
    }
}

impl fmt::Display for FileShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileShareError::Storage(e) => write!(f, "{}", e),
            FileShareError::Config(e) => write!(f, "Configuration error: {}", e),
            FileShareError::Worker(e) => write!(f, "Worker failure: {}", e),
        }
    }
}

impl std::error::Error for FileShareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileShareError::Storage(e) => Some(e),
            FileShareError::Config(e) => Some(e),
            FileShareError::Worker(_) => None,
        }
    }
}

impl From<StorageError> for FileShareError {
    fn from(error: StorageError) -> Self {
        FileShareError::Storage(error)
    }
}

impl From<config::ConfigError> for FileShareError {
    fn from(error: config::ConfigError) -> Self {
        FileShareError::Config(error)
    }
}

impl From<tokio::task::JoinError> for FileShareError {
    fn from(error: tokio::task::JoinError) -> Self {
        FileShareError::Worker(error.to_string())
    }
}
