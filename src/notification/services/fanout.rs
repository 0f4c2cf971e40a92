//! Fanout service deriving notification records from lifecycle events.
//!
//! The fanout service is the sole creator of notification records. Delivery
//! is at-least-once: a batch that fails mid-way leaves already-written
//! records in place (there is no transaction spanning the task store and the
//! notification store), and the error is surfaced to the caller, who treats
//! notification delivery as best-effort.

use crate::directory::domain::{Actor, RollNumber};
use crate::notification::{
    domain::Notification,
    ports::{NotificationRepository, NotificationRepositoryResult},
};
use crate::task::domain::{Task, TaskId};
use mockable::Clock;
use std::sync::Arc;

/// Maximum records per fanout batch insert.
///
/// Bounds the task-posted broadcast so a large user population never turns
/// into a single unbounded insert.
pub const FANOUT_CHUNK_SIZE: usize = 500;

/// Notification fanout orchestration service.
pub struct NotificationFanout<R, C>
where
    R: NotificationRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for NotificationFanout<R, C>
where
    R: NotificationRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> NotificationFanout<R, C>
where
    R: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new fanout service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Broadcasts a task-posted notification to every recipient.
    ///
    /// Writes are issued in chunks of [`FANOUT_CHUNK_SIZE`]; an empty
    /// recipient set writes nothing. Returns the number of records written.
    ///
    /// # Errors
    ///
    /// Returns the repository error of the first failing chunk. Chunks
    /// already written are kept; remaining chunks are abandoned.
    pub async fn broadcast_task_posted(
        &self,
        task: &Task,
        recipients: &[RollNumber],
    ) -> NotificationRepositoryResult<usize> {
        let records: Vec<Notification> = recipients
            .iter()
            .map(|receiver| Notification::task_posted(task, receiver.clone(), &*self.clock))
            .collect();

        let mut written = 0;
        for chunk in records.chunks(FANOUT_CHUNK_SIZE) {
            self.repository.store_batch(chunk).await?;
            written += chunk.len();
        }
        Ok(written)
    }

    /// Notifies the poster that their task was accepted.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the write fails.
    pub async fn notify_task_accepted(
        &self,
        task: &Task,
        acceptor: &Actor,
    ) -> NotificationRepositoryResult<()> {
        let record = Notification::task_accepted(task, acceptor, &*self.clock);
        self.repository.store(&record).await
    }

    /// Notifies the poster that their task was completed.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the write fails.
    pub async fn notify_task_completed(
        &self,
        task: &Task,
        acceptor: &Actor,
    ) -> NotificationRepositoryResult<()> {
        let record = Notification::task_completed(task, acceptor, &*self.clock);
        self.repository.store(&record).await
    }

    /// Notifies the poster that the acceptor confirmed the reward.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the write fails.
    pub async fn notify_reward_confirmed(
        &self,
        task: &Task,
        acceptor: &Actor,
    ) -> NotificationRepositoryResult<()> {
        let record = Notification::reward_confirmed(task, acceptor, &*self.clock);
        self.repository.store(&record).await
    }

    /// Reminds the poster that the reward is still outstanding.
    ///
    /// Reminders carry no cooldown and may be sent repeatedly.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the write fails.
    pub async fn notify_reward_reminder(
        &self,
        task: &Task,
        acceptor: &Actor,
    ) -> NotificationRepositoryResult<()> {
        let record = Notification::reward_reminder(task, acceptor, &*self.clock);
        self.repository.store(&record).await
    }

    /// Removes every notification referencing a deleted task.
    ///
    /// Returns the number of records removed. Notifications are only ever
    /// deleted through this cascade.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the bulk delete fails.
    pub async fn purge_for_task(&self, task_id: TaskId) -> NotificationRepositoryResult<u64> {
        self.repository.delete_for_task(task_id).await
    }
}
