//! File system storage management
//!
//! Handles file operations, permissions, and path validation.

pub mod filesystem;
pub mod operations;
pub mod permissions;
pub mod results;
pub mod validation;

pub use operations::Store;
pub use permissions::{Capability, Permissions};
pub use results::EntryDescriptor;
pub use validation::{ResolvedPath, resolve_path};
