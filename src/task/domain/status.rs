//! Task lifecycle status.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
///
/// Status only ever advances one step along
/// `open → accepted → completed → verified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Posted and waiting for an acceptor.
    Open,
    /// Claimed by exactly one acceptor.
    Accepted,
    /// Deliverable submitted by the acceptor.
    Completed,
    /// Reward receipt confirmed by the acceptor.
    Verified,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Verified => "verified",
        }
    }

    /// Returns whether the lifecycle permits moving to `target`.
    ///
    /// Only single forward steps are valid; regression and skipping are
    /// rejected.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::Accepted)
                | (Self::Accepted, Self::Completed)
                | (Self::Completed, Self::Verified)
        )
    }

    /// Returns whether the status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "accepted" => Ok(Self::Accepted),
            "completed" => Ok(Self::Completed),
            "verified" => Ok(Self::Verified),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
