//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    DEFAULT_LEADERBOARD_SIZE, ON_TIME_POINTS, PostTaskRequest, TaskLifecycleError,
    TaskLifecycleResult, TaskLifecycleService, TaskWithPosterPoints,
};
