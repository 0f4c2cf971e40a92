//! Directory port for profile lookup, recipient enumeration, and points.

use crate::directory::domain::{RollNumber, UserProfile};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User directory consultation contract.
///
/// The directory is consulted, not owned, by the task core: the only write
/// this port exposes is the atomic points increment awarded on on-time
/// completion.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user profile by roll number.
    ///
    /// Returns `None` when the user does not exist.
    async fn find(&self, handle: &RollNumber) -> UserDirectoryResult<Option<UserProfile>>;

    /// Returns the handles of every user except the given one.
    ///
    /// Used to compute the recipient set for task-posted fanout.
    async fn list_handles_except(
        &self,
        excluded: &RollNumber,
    ) -> UserDirectoryResult<Vec<RollNumber>>;

    /// Atomically adds `delta` to a user's points counter.
    ///
    /// Implementations MUST express this as a single in-place increment
    /// (`points = points + delta`), never as a read followed by a write, so
    /// concurrent completions by different users cannot lose updates.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::UnknownUser`] when no profile exists for
    /// the handle.
    async fn add_points(&self, handle: &RollNumber, delta: i64) -> UserDirectoryResult<()>;

    /// Returns up to `limit` profiles ordered by points, highest first.
    async fn top_by_points(&self, limit: usize) -> UserDirectoryResult<Vec<UserProfile>>;
}

/// Errors returned by user directory implementations.
#[derive(Debug, Clone, Error)]
pub enum UserDirectoryError {
    /// No profile exists for the roll number.
    #[error("unknown user: {0}")]
    UnknownUser(RollNumber),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
