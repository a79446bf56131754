//! Host-facing service layer
//!
//! Exposes the store as named operations dispatched onto worker threads.

pub mod calls;
pub mod share;

pub use calls::{Operation, ServiceCall, ServiceResponse};
pub use share::FileShare;
