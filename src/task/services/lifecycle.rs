//! Service layer orchestrating the task lifecycle.
//!
//! The lifecycle service is the sole mutator of task status, acceptance,
//! deliverable, and user points. Every state transition is validated by the
//! domain guards, then persisted through the repository's conditional update
//! so concurrent requests for the same task resolve with exactly one winner.
//! Notification fanout runs after the task mutation and is best-effort:
//! failures are logged and swallowed, never rolling back task state.

use crate::directory::{
    domain::{Actor, RollNumber, UserProfile},
    ports::{UserDirectory, UserDirectoryError},
};
use crate::notification::{
    ports::{NotificationRepository, NotificationRepositoryError},
    services::NotificationFanout,
};
use crate::task::{
    domain::{RewardSignal, Task, TaskDomainError, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Points awarded for completing a task at or before its deadline.
pub const ON_TIME_POINTS: i64 = 10;

/// Default number of users on the leaderboard.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// Request payload for posting a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTaskRequest {
    request: String,
    deadline: DateTime<Utc>,
    reward: String,
}

impl PostTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(
        request: impl Into<String>,
        deadline: DateTime<Utc>,
        reward: impl Into<String>,
    ) -> Self {
        Self {
            request: request.into(),
            deadline,
            reward: reward.into(),
        }
    }
}

/// Task annotated with the poster's current points.
///
/// Produced by the open and accepted listings, which join against the user
/// directory at read time. A poster without a directory profile is shown
/// with zero points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskWithPosterPoints {
    task: Task,
    posted_by_points: i64,
}

impl TaskWithPosterPoints {
    /// Returns the task record.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the poster's points at read time.
    #[must_use]
    pub const fn posted_by_points(&self) -> i64 {
        self.posted_by_points
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Input validation or a transition guard failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),

    /// User directory operation failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),

    /// Notification store operation failed.
    #[error(transparent)]
    Notification(#[from] NotificationRepositoryError),
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
pub struct TaskLifecycleService<T, N, U, C>
where
    T: TaskRepository,
    N: NotificationRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    directory: Arc<U>,
    fanout: NotificationFanout<N, C>,
    clock: Arc<C>,
    leaderboard_size: usize,
}

impl<T, N, U, C> Clone for TaskLifecycleService<T, N, U, C>
where
    T: TaskRepository,
    N: NotificationRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            directory: Arc::clone(&self.directory),
            fanout: self.fanout.clone(),
            clock: Arc::clone(&self.clock),
            leaderboard_size: self.leaderboard_size,
        }
    }
}

impl<T, N, U, C> TaskLifecycleService<T, N, U, C>
where
    T: TaskRepository,
    N: NotificationRepository,
    U: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with the default leaderboard
    /// size.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        directory: Arc<U>,
        fanout: NotificationFanout<N, C>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            directory,
            fanout,
            clock,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
        }
    }

    /// Overrides the leaderboard size.
    #[must_use]
    pub const fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size;
        self
    }

    /// Posts a new open task and broadcasts it to every other user.
    ///
    /// The broadcast is best-effort: a recipient-enumeration or fanout
    /// failure is logged and swallowed, leaving the stored task intact.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the request or reward
    /// text is empty, or [`TaskLifecycleError::Repository`] when persistence
    /// fails.
    pub async fn post_task(
        &self,
        actor: &Actor,
        request: PostTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let PostTaskRequest {
            request: request_text,
            deadline,
            reward,
        } = request;
        let task = Task::post(actor, request_text, deadline, reward, &*self.clock)?;
        self.tasks.store(&task).await?;

        match self.directory.list_handles_except(actor.handle()).await {
            Ok(recipients) => {
                if let Err(err) = self.fanout.broadcast_task_posted(&task, &recipients).await {
                    tracing::warn!(task_id = %task.id(), error = %err, "task-posted fanout failed");
                }
            }
            Err(err) => {
                tracing::warn!(task_id = %task.id(), error = %err, "fanout recipient lookup failed");
            }
        }

        Ok(task)
    }

    /// Returns open, unaccepted tasks annotated with poster points.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] or
    /// [`TaskLifecycleError::Directory`] when a lookup fails.
    pub async fn list_open_tasks(&self) -> TaskLifecycleResult<Vec<TaskWithPosterPoints>> {
        let tasks = self.tasks.list_open().await?;
        self.annotate_with_points(tasks).await
    }

    /// Returns tasks posted by the given user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_posted_tasks(&self, poster: &RollNumber) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.list_posted_by(poster).await?)
    }

    /// Returns tasks accepted by the given user, annotated with poster
    /// points.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] or
    /// [`TaskLifecycleError::Directory`] when a lookup fails.
    pub async fn list_accepted_tasks(
        &self,
        acceptor: &RollNumber,
    ) -> TaskLifecycleResult<Vec<TaskWithPosterPoints>> {
        let tasks = self.tasks.list_accepted_by(acceptor).await?;
        self.annotate_with_points(tasks).await
    }

    /// Accepts an open task on behalf of `actor`.
    ///
    /// Acceptance is a compare-and-set: of two concurrent accepts for the
    /// same task, exactly one wins and the other receives
    /// [`TaskDomainError::AlreadyClaimed`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not
    /// exist, or [`TaskLifecycleError::Domain`] when a guard rejects the
    /// claim.
    pub async fn accept_task(&self, actor: &Actor, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task(task_id).await?;
        task.claim(actor)?;

        match self.tasks.update_from(&task, TaskStatus::Open).await {
            Ok(()) => {}
            // The conditional update lost the race: someone claimed the task
            // between our read and our write.
            Err(TaskRepositoryError::StaleState { .. }) => {
                return Err(TaskDomainError::AlreadyClaimed(task_id).into());
            }
            Err(other) => return Err(other.into()),
        }

        if let Err(err) = self.fanout.notify_task_accepted(&task, actor).await {
            tracing::warn!(task_id = %task_id, error = %err, "task-accepted notification failed");
        }
        Ok(task)
    }

    /// Completes an accepted task, optionally attaching a deliverable.
    ///
    /// Awards [`ON_TIME_POINTS`] to the acceptor exactly once when the
    /// completion lands at or before the deadline. Returns the completed
    /// task and the points awarded.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not
    /// exist, [`TaskLifecycleError::Domain`] when a guard rejects the
    /// completion, or [`TaskLifecycleError::Directory`] when the points
    /// award fails.
    pub async fn complete_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
        file_link: Option<String>,
    ) -> TaskLifecycleResult<(Task, i64)> {
        let mut task = self.find_task(task_id).await?;
        task.complete(actor, file_link, &*self.clock)?;
        self.tasks.update_from(&task, TaskStatus::Accepted).await?;

        let points_awarded = if task.completed_on_time() {
            self.directory
                .add_points(actor.handle(), ON_TIME_POINTS)
                .await?;
            ON_TIME_POINTS
        } else {
            0
        };

        if let Err(err) = self.fanout.notify_task_completed(&task, actor).await {
            tracing::warn!(task_id = %task_id, error = %err, "task-completed notification failed");
        }
        Ok((task, points_awarded))
    }

    /// Records the acceptor's reward receipt signal.
    ///
    /// A `received` signal verifies the task and notifies the poster; a
    /// `not_received` signal leaves the status untouched and sends the
    /// poster a reminder (repeatable, no cooldown).
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not
    /// exist, [`TaskLifecycleError::Domain`] when the actor is not the
    /// acceptor or the task is not completed, or
    /// [`TaskLifecycleError::Notification`] when the reminder write fails.
    pub async fn set_reward_status(
        &self,
        actor: &Actor,
        task_id: TaskId,
        signal: RewardSignal,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task(task_id).await?;

        match signal {
            RewardSignal::Received => {
                task.confirm_reward(actor)?;
                self.tasks
                    .update_from(&task, TaskStatus::Completed)
                    .await?;
                if let Err(err) = self.fanout.notify_reward_confirmed(&task, actor).await {
                    tracing::warn!(task_id = %task_id, error = %err, "reward-confirmed notification failed");
                }
            }
            RewardSignal::NotReceived => {
                task.ensure_reward_reportable(actor)?;
                // The reminder is the operation's only effect, so its write
                // failure is surfaced rather than swallowed.
                self.fanout.notify_reward_reminder(&task, actor).await?;
            }
        }
        Ok(task)
    }

    /// Deletes a task and cascades to its notifications.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not
    /// exist, [`TaskLifecycleError::Domain`] when the actor is not the
    /// poster, or [`TaskLifecycleError::Notification`] when the cascade
    /// fails after the task row is already gone.
    pub async fn delete_task(&self, actor: &Actor, task_id: TaskId) -> TaskLifecycleResult<()> {
        let task = self.find_task(task_id).await?;
        task.ensure_deletable_by(actor)?;

        self.tasks.delete(task_id).await?;
        self.fanout.purge_for_task(task_id).await?;
        Ok(())
    }

    /// Returns the top users by points, capped at the configured
    /// leaderboard size ([`DEFAULT_LEADERBOARD_SIZE`] unless overridden).
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Directory`] when the lookup fails.
    pub async fn leaderboard(&self) -> TaskLifecycleResult<Vec<UserProfile>> {
        Ok(self.directory.top_by_points(self.leaderboard_size).await?)
    }

    async fn find_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    async fn annotate_with_points(
        &self,
        tasks: Vec<Task>,
    ) -> TaskLifecycleResult<Vec<TaskWithPosterPoints>> {
        let mut annotated = Vec::with_capacity(tasks.len());
        for task in tasks {
            let posted_by_points = self
                .directory
                .find(task.posted_by())
                .await?
                .map_or(0, |profile| profile.points());
            annotated.push(TaskWithPosterPoints {
                task,
                posted_by_points,
            });
        }
        Ok(annotated)
    }
}
