pub mod config;
pub mod console;
pub mod error;
pub mod protocol;
pub mod service;
pub mod storage;

pub use crate::config::ShareConfig;
pub use error::{ErrorKind, FileShareError, StorageError};
pub use service::FileShare;
pub use storage::{EntryDescriptor, Permissions, Store};
