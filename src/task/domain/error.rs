//! Error types for task domain validation and guards.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or transitioning domain tasks.
///
/// Each guard failure carries a human-readable reason naming the specific
/// guard that rejected the operation; none of them leaves the task mutated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task request text is empty after trimming.
    #[error("task request must not be empty")]
    EmptyRequest,

    /// The reward description is empty after trimming.
    #[error("reward description must not be empty")]
    EmptyReward,

    /// The poster attempted to accept their own task.
    #[error("you cannot accept your own task: {0}")]
    SelfAcceptance(TaskId),

    /// Another user already holds the acceptance.
    #[error("task {0} has already been accepted by someone else")]
    AlreadyClaimed(TaskId),

    /// The actor is not the user the task was accepted by.
    #[error("you are not assigned to task {0}")]
    NotAssignee(TaskId),

    /// The actor is not the user who posted the task.
    #[error("only the poster may delete task {0}")]
    NotPoster(TaskId),

    /// The current status does not permit the requested transition.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Task being transitioned.
        task_id: TaskId,
        /// Current lifecycle status.
        from: TaskStatus,
        /// Requested lifecycle status.
        to: TaskStatus,
    },

    /// Reward receipt can only be reported on a completed task.
    #[error("reward status cannot be reported for task {task_id} while it is {status}")]
    RewardNotReportable {
        /// Task the signal targeted.
        task_id: TaskId,
        /// Current lifecycle status.
        status: TaskStatus,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing reward signals from caller input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown reward signal: {0}")]
pub struct ParseRewardSignalError(pub String);
