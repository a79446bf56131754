//! Share permissions
//!
//! Capability flags gating each class of file operation.

use serde::Deserialize;
use std::fmt;

use crate::error::StorageError;

/// A class of operation gated by one permission flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Read,
    Write,
    Delete,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Read => f.write_str("read"),
            Capability::Write => f.write_str("write"),
            Capability::Delete => f.write_str("delete"),
        }
    }
}

/// Read/write/delete flags for a share, fixed for the lifetime of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Permissions {
    #[serde(default = "enabled")]
    pub read: bool,
    #[serde(default = "enabled")]
    pub write: bool,
    #[serde(default = "enabled")]
    pub delete: bool,
}

fn enabled() -> bool {
    true
}

impl Default for Permissions {
    fn default() -> Self {
        Self::all()
    }
}

impl Permissions {
    pub fn all() -> Self {
        Self {
            read: true,
            write: true,
            delete: true,
        }
    }

    pub fn read_only() -> Self {
        Self {
            read: true,
            write: false,
            delete: false,
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Read => self.read,
            Capability::Write => self.write,
            Capability::Delete => self.delete,
        }
    }

    /// Fail with `PermissionDenied` unless `capability` is granted
    pub fn require(&self, capability: Capability) -> Result<(), StorageError> {
        if self.allows(capability) {
            Ok(())
        } else {
            Err(StorageError::PermissionDenied(capability))
        }
    }
}
