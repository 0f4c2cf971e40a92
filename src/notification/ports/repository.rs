//! Repository port for notification persistence and inbox queries.

use crate::directory::domain::RollNumber;
use crate::notification::domain::{Notification, NotificationId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification repository operations.
pub type NotificationRepositoryResult<T> = Result<T, NotificationRepositoryError>;

/// Notification persistence contract.
///
/// Records are append-only apart from the `read` flag; bulk deletion exists
/// solely to cascade a task deletion.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Stores a single notification record.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::DuplicateNotification`] when
    /// the identifier already exists.
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()>;

    /// Stores a batch of notification records.
    ///
    /// Callers bound batch sizes; the write is not transactional across
    /// batches, so records from earlier batches survive a later failure.
    async fn store_batch(&self, batch: &[Notification]) -> NotificationRepositoryResult<()>;

    /// Returns up to `limit` notifications for a receiver, newest first.
    async fn list_for_receiver(
        &self,
        receiver: &RollNumber,
        limit: usize,
    ) -> NotificationRepositoryResult<Vec<Notification>>;

    /// Counts a receiver's unread notifications.
    async fn count_unread(&self, receiver: &RollNumber) -> NotificationRepositoryResult<u64>;

    /// Marks one notification read on behalf of its receiver.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::NotFound`] when the identifier
    /// is unknown, or [`NotificationRepositoryError::NotReceiver`] when the
    /// record is addressed to someone else.
    async fn mark_read(
        &self,
        id: NotificationId,
        receiver: &RollNumber,
    ) -> NotificationRepositoryResult<()>;

    /// Marks all of a receiver's unread notifications read.
    ///
    /// Returns the number of records updated.
    async fn mark_all_read(&self, receiver: &RollNumber) -> NotificationRepositoryResult<u64>;

    /// Deletes every notification referencing the given task.
    ///
    /// Returns the number of records removed.
    async fn delete_for_task(&self, task_id: TaskId) -> NotificationRepositoryResult<u64>;
}

/// Errors returned by notification repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationRepositoryError {
    /// A notification with the same identifier already exists.
    #[error("duplicate notification identifier: {0}")]
    DuplicateNotification(NotificationId),

    /// The notification was not found.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    /// The caller is not the receiver of the notification.
    #[error("notification {0} is addressed to another user")]
    NotReceiver(NotificationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
