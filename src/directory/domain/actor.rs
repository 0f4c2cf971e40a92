//! Authenticated caller identity resolved by the external identity provider.

use super::{DirectoryDomainError, RollNumber};
use serde::{Deserialize, Serialize};

/// Authenticated caller of a lifecycle or inbox operation.
///
/// The identity provider (external to this crate) resolves each request to a
/// roll number and display name; the core only validates their shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    handle: RollNumber,
    display_name: String,
}

impl Actor {
    /// Creates a validated actor from resolved identity fields.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError`] when the roll number fails validation
    /// or the display name is empty after trimming.
    pub fn new(
        handle: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, DirectoryDomainError> {
        let validated_handle = RollNumber::new(handle)?;
        let raw_name = display_name.into();
        let trimmed_name = raw_name.trim();
        if trimmed_name.is_empty() {
            return Err(DirectoryDomainError::EmptyDisplayName);
        }
        Ok(Self {
            handle: validated_handle,
            display_name: trimmed_name.to_owned(),
        })
    }

    /// Returns the actor's roll number.
    #[must_use]
    pub const fn handle(&self) -> &RollNumber {
        &self.handle
    }

    /// Returns the actor's display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
