//! Notification aggregate and message construction.

use super::{NotificationId, ParseNotificationKindError};
use crate::directory::domain::{Actor, RollNumber};
use crate::task::domain::{Task, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of request characters quoted in a task-posted broadcast.
const POSTED_EXCERPT_CHARS: usize = 50;

/// Kind of lifecycle event a notification records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A new task was posted; broadcast to every other user.
    TaskPosted,
    /// The receiver's task was accepted.
    TaskAccepted,
    /// The receiver's task was completed.
    TaskCompleted,
    /// The acceptor confirmed receiving the reward.
    RewardConfirmed,
    /// The acceptor is still waiting for the reward.
    RewardReminder,
}

impl NotificationKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskPosted => "task_posted",
            Self::TaskAccepted => "task_accepted",
            Self::TaskCompleted => "task_completed",
            Self::RewardConfirmed => "reward_confirmed",
            Self::RewardReminder => "reward_reminder",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for NotificationKind {
    type Error = ParseNotificationKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "task_posted" => Ok(Self::TaskPosted),
            "task_accepted" => Ok(Self::TaskAccepted),
            "task_completed" => Ok(Self::TaskCompleted),
            "reward_confirmed" => Ok(Self::RewardConfirmed),
            "reward_reminder" => Ok(Self::RewardReminder),
            _ => Err(ParseNotificationKindError(value.to_owned())),
        }
    }
}

/// Notification record addressed to a single receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    kind: NotificationKind,
    sender: RollNumber,
    sender_name: String,
    receiver: RollNumber,
    message: String,
    task_id: TaskId,
    read: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedNotificationData {
    /// Persisted notification identifier.
    pub id: NotificationId,
    /// Persisted event kind.
    pub kind: NotificationKind,
    /// Persisted sender handle.
    pub sender: RollNumber,
    /// Persisted sender display name.
    pub sender_name: String,
    /// Persisted receiver handle.
    pub receiver: RollNumber,
    /// Persisted message text.
    pub message: String,
    /// Persisted referenced task.
    pub task_id: TaskId,
    /// Persisted read flag.
    pub read: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Builds the task-posted broadcast record for one recipient.
    #[must_use]
    pub fn task_posted(task: &Task, receiver: RollNumber, clock: &impl Clock) -> Self {
        let excerpt: String = task.request().chars().take(POSTED_EXCERPT_CHARS).collect();
        let message = format!(
            "New Task Posted by {}: {excerpt}... Check it out!",
            task.posted_by_name()
        );
        Self::from_event(
            NotificationKind::TaskPosted,
            task.posted_by().clone(),
            task.posted_by_name().to_owned(),
            receiver,
            message,
            task.id(),
            clock,
        )
    }

    /// Builds the acceptance record addressed to the task's poster.
    #[must_use]
    pub fn task_accepted(task: &Task, acceptor: &Actor, clock: &impl Clock) -> Self {
        let message = format!(
            "Your request has been accepted by {}.",
            acceptor.display_name()
        );
        Self::to_poster(NotificationKind::TaskAccepted, task, acceptor, message, clock)
    }

    /// Builds the completion record addressed to the task's poster.
    #[must_use]
    pub fn task_completed(task: &Task, acceptor: &Actor, clock: &impl Clock) -> Self {
        let message = format!(
            "{} has submitted your task. Please give reward within 2 days.",
            acceptor.display_name()
        );
        Self::to_poster(
            NotificationKind::TaskCompleted,
            task,
            acceptor,
            message,
            clock,
        )
    }

    /// Builds the reward-confirmed record addressed to the task's poster.
    #[must_use]
    pub fn reward_confirmed(task: &Task, acceptor: &Actor, clock: &impl Clock) -> Self {
        let message = format!(
            "{} has confirmed receiving the reward for your task.",
            acceptor.display_name()
        );
        Self::to_poster(
            NotificationKind::RewardConfirmed,
            task,
            acceptor,
            message,
            clock,
        )
    }

    /// Builds the reward-reminder record addressed to the task's poster.
    ///
    /// Reminders may be sent repeatedly; no cooldown is applied.
    #[must_use]
    pub fn reward_reminder(task: &Task, acceptor: &Actor, clock: &impl Clock) -> Self {
        let message = format!(
            "{} hasn't received the reward yet for the completed task.",
            acceptor.display_name()
        );
        Self::to_poster(
            NotificationKind::RewardReminder,
            task,
            acceptor,
            message,
            clock,
        )
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedNotificationData) -> Self {
        Self {
            id: data.id,
            kind: data.kind,
            sender: data.sender,
            sender_name: data.sender_name,
            receiver: data.receiver,
            message: data.message,
            task_id: data.task_id,
            read: data.read,
            created_at: data.created_at,
        }
    }

    fn to_poster(
        kind: NotificationKind,
        task: &Task,
        acceptor: &Actor,
        message: String,
        clock: &impl Clock,
    ) -> Self {
        Self::from_event(
            kind,
            acceptor.handle().clone(),
            acceptor.display_name().to_owned(),
            task.posted_by().clone(),
            message,
            task.id(),
            clock,
        )
    }

    fn from_event(
        kind: NotificationKind,
        sender: RollNumber,
        sender_name: String,
        receiver: RollNumber,
        message: String,
        task_id: TaskId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            sender,
            sender_name,
            receiver,
            message,
            task_id,
            read: false,
            created_at: clock.utc(),
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the sender's roll number.
    #[must_use]
    pub const fn sender(&self) -> &RollNumber {
        &self.sender
    }

    /// Returns the sender's display name.
    #[must_use]
    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    /// Returns the receiver's roll number.
    #[must_use]
    pub const fn receiver(&self) -> &RollNumber {
        &self.receiver
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the referenced task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns whether the receiver has read the notification.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks the notification as read.
    ///
    /// The `read` flag is the only mutable field of a notification.
    pub const fn mark_read(&mut self) {
        self.read = true;
    }
}
