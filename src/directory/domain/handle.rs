//! Unique user handle used throughout the task exchange.

use super::DirectoryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum stored length of a roll number.
const MAX_ROLL_NUMBER_LENGTH: usize = 50;

/// Validated campus roll number identifying a user.
///
/// Roll numbers are the unique handle for every user-facing record in the
/// exchange: task posters and acceptors, notification senders and receivers,
/// and leaderboard rows all reference users by roll number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollNumber(String);

impl RollNumber {
    /// Creates a validated roll number from raw input.
    ///
    /// Input is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError`] when the trimmed value is empty,
    /// exceeds 50 characters, or contains characters outside
    /// `[A-Za-z0-9_-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(DirectoryDomainError::EmptyRollNumber);
        }
        if trimmed.len() > MAX_ROLL_NUMBER_LENGTH {
            return Err(DirectoryDomainError::RollNumberTooLong(trimmed));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(DirectoryDomainError::InvalidRollNumber(trimmed));
        }
        Ok(Self(trimmed))
    }

    /// Returns the roll number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the roll number, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for RollNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RollNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
