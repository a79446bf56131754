//! Service call types
//!
//! The named operations a host can dispatch, and their inputs and outputs.

use std::fmt;
use std::str::FromStr;

use crate::storage::EntryDescriptor;

pub const SERVICE_LIST_FILES: &str = "list_files";
pub const SERVICE_UPLOAD_FILE: &str = "upload_file";
pub const SERVICE_DOWNLOAD_FILE: &str = "download_file";
pub const SERVICE_DELETE_FILE: &str = "delete_file";
pub const SERVICE_CREATE_DIRECTORY: &str = "create_directory";

/// Operation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Upload,
    Download,
    Delete,
    CreateDirectory,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::List,
        Operation::Upload,
        Operation::Download,
        Operation::Delete,
        Operation::CreateDirectory,
    ];

    /// Registered service name
    pub fn name(self) -> &'static str {
        match self {
            Operation::List => SERVICE_LIST_FILES,
            Operation::Upload => SERVICE_UPLOAD_FILE,
            Operation::Download => SERVICE_DOWNLOAD_FILE,
            Operation::Delete => SERVICE_DELETE_FILE,
            Operation::CreateDirectory => SERVICE_CREATE_DIRECTORY,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown service: {}", s))
    }
}

/// A dispatched request: operation, logical path and upload content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCall {
    pub operation: Operation,
    pub path: String,
    /// Only meaningful for uploads
    pub content: Vec<u8>,
}

impl ServiceCall {
    pub fn new(operation: Operation, path: impl Into<String>) -> Self {
        Self {
            operation,
            path: path.into(),
            content: Vec::new(),
        }
    }

    pub fn upload(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            operation: Operation::Upload,
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Success payload of a service call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceResponse {
    Files(Vec<EntryDescriptor>),
    Content(Vec<u8>),
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>(), Ok(op));
        }
        assert_eq!("LIST_FILES".parse::<Operation>(), Ok(Operation::List));
        assert!("rename_file".parse::<Operation>().is_err());
    }
}
