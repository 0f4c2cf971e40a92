//! Port contracts for user directory consultation.
//!
//! Ports define infrastructure-agnostic interfaces used by the task core.

pub mod directory;

pub use directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
