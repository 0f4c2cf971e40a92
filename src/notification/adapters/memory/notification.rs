//! Thread-safe in-memory notification repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::domain::RollNumber;
use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory notification repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    state: Arc<RwLock<HashMap<NotificationId, Notification>>>,
}

impl InMemoryNotificationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Sorts notifications newest first, tie-breaking on ID for a stable order.
fn sort_newest_first(notifications: &mut [Notification]) {
    notifications.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().into_inner().cmp(&a.id().into_inner()))
    });
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&notification.id()) {
            return Err(NotificationRepositoryError::DuplicateNotification(
                notification.id(),
            ));
        }
        state.insert(notification.id(), notification.clone());
        Ok(())
    }

    async fn store_batch(&self, batch: &[Notification]) -> NotificationRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        for notification in batch {
            if state.contains_key(&notification.id()) {
                return Err(NotificationRepositoryError::DuplicateNotification(
                    notification.id(),
                ));
            }
        }
        for notification in batch {
            state.insert(notification.id(), notification.clone());
        }
        Ok(())
    }

    async fn list_for_receiver(
        &self,
        receiver: &RollNumber,
        limit: usize,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let state = self.state.read().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut notifications: Vec<Notification> = state
            .values()
            .filter(|notification| notification.receiver() == receiver)
            .cloned()
            .collect();
        sort_newest_first(&mut notifications);
        notifications.truncate(limit);
        Ok(notifications)
    }

    async fn count_unread(&self, receiver: &RollNumber) -> NotificationRepositoryResult<u64> {
        let state = self.state.read().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let count = state
            .values()
            .filter(|notification| notification.receiver() == receiver && !notification.is_read())
            .count();
        u64::try_from(count).map_err(NotificationRepositoryError::persistence)
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        receiver: &RollNumber,
    ) -> NotificationRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let notification = state
            .get_mut(&id)
            .ok_or(NotificationRepositoryError::NotFound(id))?;
        if notification.receiver() != receiver {
            return Err(NotificationRepositoryError::NotReceiver(id));
        }
        notification.mark_read();
        Ok(())
    }

    async fn mark_all_read(&self, receiver: &RollNumber) -> NotificationRepositoryResult<u64> {
        let mut state = self.state.write().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut updated: u64 = 0;
        for notification in state.values_mut() {
            if notification.receiver() == receiver && !notification.is_read() {
                notification.mark_read();
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn delete_for_task(&self, task_id: TaskId) -> NotificationRepositoryResult<u64> {
        let mut state = self.state.write().map_err(|err| {
            NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let before = state.len();
        state.retain(|_, notification| notification.task_id() != task_id);
        let removed = before.saturating_sub(state.len());
        u64::try_from(removed).map_err(NotificationRepositoryError::persistence)
    }
}
