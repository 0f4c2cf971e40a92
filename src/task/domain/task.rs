//! Task aggregate root and lifecycle guard logic.

use super::{ParseRewardSignalError, TaskDomainError, TaskId, TaskStatus};
use crate::directory::domain::{Actor, RollNumber};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Caller-supplied reward receipt signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardSignal {
    /// The acceptor received the promised reward.
    Received,
    /// The acceptor is still waiting for the reward.
    NotReceived,
}

impl TryFrom<&str> for RewardSignal {
    type Error = ParseRewardSignalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "received" => Ok(Self::Received),
            "not_received" => Ok(Self::NotReceived),
            _ => Err(ParseRewardSignalError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
///
/// All mutators are guard methods: they validate actor identity and the
/// current status before touching any field, and a rejected guard leaves the
/// task unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    request: String,
    deadline: DateTime<Utc>,
    reward: String,
    posted_by: RollNumber,
    posted_by_name: String,
    accepted_by: Option<RollNumber>,
    accepted_by_name: Option<String>,
    status: TaskStatus,
    file_link: Option<String>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted request text.
    pub request: String,
    /// Persisted deadline.
    pub deadline: DateTime<Utc>,
    /// Persisted reward description.
    pub reward: String,
    /// Persisted poster handle.
    pub posted_by: RollNumber,
    /// Persisted poster display name.
    pub posted_by_name: String,
    /// Persisted acceptor handle, if any.
    pub accepted_by: Option<RollNumber>,
    /// Persisted acceptor display name, if any.
    pub accepted_by_name: Option<String>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted deliverable reference, if any.
    pub file_link: Option<String>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new open task posted by `poster`.
    ///
    /// Request and reward text are trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyRequest`] or
    /// [`TaskDomainError::EmptyReward`] when either text is empty after
    /// trimming.
    pub fn post(
        poster: &Actor,
        request: impl Into<String>,
        deadline: DateTime<Utc>,
        reward: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let raw_request = request.into();
        let trimmed_request = raw_request.trim();
        if trimmed_request.is_empty() {
            return Err(TaskDomainError::EmptyRequest);
        }
        let raw_reward = reward.into();
        let trimmed_reward = raw_reward.trim();
        if trimmed_reward.is_empty() {
            return Err(TaskDomainError::EmptyReward);
        }

        Ok(Self {
            id: TaskId::new(),
            request: trimmed_request.to_owned(),
            deadline,
            reward: trimmed_reward.to_owned(),
            posted_by: poster.handle().clone(),
            posted_by_name: poster.display_name().to_owned(),
            accepted_by: None,
            accepted_by_name: None,
            status: TaskStatus::Open,
            file_link: None,
            completed_at: None,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            request: data.request,
            deadline: data.deadline,
            reward: data.reward,
            posted_by: data.posted_by,
            posted_by_name: data.posted_by_name,
            accepted_by: data.accepted_by,
            accepted_by_name: data.accepted_by_name,
            status: data.status,
            file_link: data.file_link,
            completed_at: data.completed_at,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the request text.
    #[must_use]
    pub fn request(&self) -> &str {
        &self.request
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the reward description.
    #[must_use]
    pub fn reward(&self) -> &str {
        &self.reward
    }

    /// Returns the poster's roll number.
    #[must_use]
    pub const fn posted_by(&self) -> &RollNumber {
        &self.posted_by
    }

    /// Returns the poster's display name.
    #[must_use]
    pub fn posted_by_name(&self) -> &str {
        &self.posted_by_name
    }

    /// Returns the acceptor's roll number, if claimed.
    #[must_use]
    pub const fn accepted_by(&self) -> Option<&RollNumber> {
        self.accepted_by.as_ref()
    }

    /// Returns the acceptor's display name, if claimed.
    #[must_use]
    pub fn accepted_by_name(&self) -> Option<&str> {
        self.accepted_by_name.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the deliverable reference, if any.
    #[must_use]
    pub fn file_link(&self) -> Option<&str> {
        self.file_link.as_deref()
    }

    /// Returns the completion timestamp, if completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether the task was completed at or before its deadline.
    #[must_use]
    pub fn completed_on_time(&self) -> bool {
        self.completed_at.is_some_and(|at| at <= self.deadline)
    }

    /// Claims the task for `actor`, moving it to [`TaskStatus::Accepted`].
    ///
    /// The persisted write must additionally go through the repository's
    /// conditional update so a concurrent claim cannot slip in between the
    /// guard and the save.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SelfAcceptance`] when the actor posted the
    /// task, [`TaskDomainError::InvalidStatusTransition`] when the task is no
    /// longer open, or [`TaskDomainError::AlreadyClaimed`] when another user
    /// already holds the acceptance.
    pub fn claim(&mut self, actor: &Actor) -> Result<(), TaskDomainError> {
        if *actor.handle() == self.posted_by {
            return Err(TaskDomainError::SelfAcceptance(self.id));
        }
        if self.accepted_by.is_some() {
            return Err(TaskDomainError::AlreadyClaimed(self.id));
        }
        if !self.status.can_transition_to(TaskStatus::Accepted) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: TaskStatus::Accepted,
            });
        }

        self.accepted_by = Some(actor.handle().clone());
        self.accepted_by_name = Some(actor.display_name().to_owned());
        self.status = TaskStatus::Accepted;
        Ok(())
    }

    /// Completes the task, attaching an optional deliverable reference.
    ///
    /// Sets `completed_at` to the current clock time; whether the completion
    /// was on time is answered afterwards by [`Self::completed_on_time`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssignee`] when the actor did not accept
    /// the task, or [`TaskDomainError::InvalidStatusTransition`] when the
    /// task is not currently accepted.
    pub fn complete(
        &mut self,
        actor: &Actor,
        file_link: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_assignee(actor)?;
        if !self.status.can_transition_to(TaskStatus::Completed) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: TaskStatus::Completed,
            });
        }

        self.file_link = file_link
            .map(|link| link.trim().to_owned())
            .filter(|link| !link.is_empty());
        self.completed_at = Some(clock.utc());
        self.status = TaskStatus::Completed;
        Ok(())
    }

    /// Confirms reward receipt, moving the task to [`TaskStatus::Verified`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssignee`] when the actor did not accept
    /// the task, or [`TaskDomainError::RewardNotReportable`] when the task is
    /// not currently completed.
    pub fn confirm_reward(&mut self, actor: &Actor) -> Result<(), TaskDomainError> {
        self.ensure_reward_reportable(actor)?;
        self.status = TaskStatus::Verified;
        Ok(())
    }

    /// Validates that `actor` may report reward status on this task.
    ///
    /// Shared guard for reward confirmation and reward reminders: the actor
    /// must be the acceptor and the task must currently be completed. The
    /// reminder path performs no transition, so the guard is exposed
    /// separately.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssignee`] or
    /// [`TaskDomainError::RewardNotReportable`] as for
    /// [`Self::confirm_reward`].
    pub fn ensure_reward_reportable(&self, actor: &Actor) -> Result<(), TaskDomainError> {
        self.ensure_assignee(actor)?;
        if !self.status.can_transition_to(TaskStatus::Verified) {
            return Err(TaskDomainError::RewardNotReportable {
                task_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    /// Validates that `actor` may delete this task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotPoster`] when the actor is not the user
    /// who posted the task.
    pub fn ensure_deletable_by(&self, actor: &Actor) -> Result<(), TaskDomainError> {
        if *actor.handle() != self.posted_by {
            return Err(TaskDomainError::NotPoster(self.id));
        }
        Ok(())
    }

    fn ensure_assignee(&self, actor: &Actor) -> Result<(), TaskDomainError> {
        if self.accepted_by.as_ref() != Some(actor.handle()) {
            return Err(TaskDomainError::NotAssignee(self.id));
        }
        Ok(())
    }
}
