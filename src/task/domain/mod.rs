//! Domain model for the task lifecycle.
//!
//! The task domain models posting, claiming, completion, and reward
//! confirmation while keeping all infrastructure concerns outside of the
//! domain boundary. Every state transition is guarded here; adapters only
//! enforce the conditional-update discipline that makes the guards hold
//! under concurrency.

mod error;
mod ids;
mod status;
mod task;

pub use error::{ParseRewardSignalError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::TaskStatus;
pub use task::{PersistedTaskData, RewardSignal, Task};
