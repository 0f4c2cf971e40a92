//! Read-side user profile projection.

use super::RollNumber;
use serde::{Deserialize, Serialize};

/// Directory view of a user: handle, display name, and accumulated points.
///
/// Profiles are owned by the external authentication surface; the task core
/// only reads them and increments `points` through the directory port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    handle: RollNumber,
    name: String,
    points: i64,
}

impl UserProfile {
    /// Creates a profile projection from directory fields.
    #[must_use]
    pub const fn new(handle: RollNumber, name: String, points: i64) -> Self {
        Self {
            handle,
            name,
            points,
        }
    }

    /// Returns the user's roll number.
    #[must_use]
    pub const fn handle(&self) -> &RollNumber {
        &self.handle
    }

    /// Returns the user's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the user's accumulated points.
    #[must_use]
    pub const fn points(&self) -> i64 {
        self.points
    }
}
