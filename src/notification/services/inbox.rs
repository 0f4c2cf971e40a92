//! Inbox service for per-receiver notification access.

use crate::directory::domain::RollNumber;
use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryResult},
};
use std::sync::Arc;

/// Default number of notifications returned per inbox page.
pub const DEFAULT_INBOX_PAGE_SIZE: usize = 50;

/// One page of a receiver's inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxPage {
    notifications: Vec<Notification>,
    unread_count: u64,
}

impl InboxPage {
    /// Returns the page's notifications, newest first.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Returns the receiver's total unread count.
    #[must_use]
    pub const fn unread_count(&self) -> u64 {
        self.unread_count
    }
}

/// Per-receiver inbox service.
///
/// Ownership is enforced here and in the repository: only the receiver of a
/// notification may mark it read.
pub struct InboxService<R>
where
    R: NotificationRepository,
{
    repository: Arc<R>,
    page_size: usize,
}

impl<R> Clone for InboxService<R>
where
    R: NotificationRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            page_size: self.page_size,
        }
    }
}

impl<R> InboxService<R>
where
    R: NotificationRepository,
{
    /// Creates an inbox service with the default page size.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            page_size: DEFAULT_INBOX_PAGE_SIZE,
        }
    }

    /// Overrides the inbox page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Returns the receiver's newest notifications and unread count.
    ///
    /// # Errors
    ///
    /// Returns the repository error when either query fails.
    pub async fn inbox(&self, receiver: &RollNumber) -> NotificationRepositoryResult<InboxPage> {
        let notifications = self
            .repository
            .list_for_receiver(receiver, self.page_size)
            .await?;
        let unread_count = self.repository.count_unread(receiver).await?;
        Ok(InboxPage {
            notifications,
            unread_count,
        })
    }

    /// Marks one notification read on behalf of its receiver.
    ///
    /// # Errors
    ///
    /// Returns [`crate::notification::ports::NotificationRepositoryError::NotFound`]
    /// when the identifier is unknown, or
    /// [`crate::notification::ports::NotificationRepositoryError::NotReceiver`]
    /// when the record belongs to another user.
    pub async fn mark_read(
        &self,
        receiver: &RollNumber,
        id: NotificationId,
    ) -> NotificationRepositoryResult<()> {
        self.repository.mark_read(id, receiver).await
    }

    /// Marks all of the receiver's unread notifications read.
    ///
    /// Returns the number of records updated.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the bulk update fails.
    pub async fn mark_all_read(&self, receiver: &RollNumber) -> NotificationRepositoryResult<u64> {
        self.repository.mark_all_read(receiver).await
    }
}
