//! Repository port for task persistence, lookup, and conditional updates.

use crate::directory::domain::RollNumber;
use crate::task::domain::{Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Mutations that follow a read (`update_from`) are conditional: the write
/// only lands while the stored row still matches the status the caller read.
/// This is what keeps the single-acceptor invariant true under concurrent
/// requests without database-native locking.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists `task` only while the stored row still carries `expected`
    /// status.
    ///
    /// When `expected` is [`TaskStatus::Open`], implementations must also
    /// require the stored `accepted_by` to be unset, making the claim path a
    /// compare-and-set on `(status, accepted_by)`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::StaleState`] when the stored status
    /// no longer matches `expected` (the caller lost a race).
    async fn update_from(&self, task: &Task, expected: TaskStatus) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns open, unaccepted tasks, newest first.
    async fn list_open(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks posted by the given user, newest first.
    async fn list_posted_by(&self, poster: &RollNumber) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks accepted by the given user, newest first.
    async fn list_accepted_by(&self, acceptor: &RollNumber) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored status no longer matches what the caller read.
    #[error("task {task_id} is no longer {expected}")]
    StaleState {
        /// Task whose conditional update failed.
        task_id: TaskId,
        /// Status the caller expected to still hold.
        expected: TaskStatus,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
