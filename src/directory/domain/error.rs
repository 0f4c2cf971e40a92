//! Error types for directory domain validation.

use thiserror::Error;

/// Errors returned while constructing directory domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryDomainError {
    /// The roll number is empty after trimming.
    #[error("roll number must not be empty")]
    EmptyRollNumber,

    /// The roll number contains characters outside `[A-Za-z0-9_-]`.
    #[error(
        "roll number '{0}' contains invalid characters (only alphanumeric, underscore and hyphen allowed)"
    )]
    InvalidRollNumber(String),

    /// The roll number exceeds the 50-character storage limit.
    #[error("roll number exceeds 50 character limit: {0}")]
    RollNumberTooLong(String),

    /// The actor display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,
}
