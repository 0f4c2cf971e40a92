//! Unit tests for task status transition validation.

use crate::task::domain::TaskStatus;
use rstest::rstest;

#[rstest]
#[case(TaskStatus::Open, TaskStatus::Open, false)]
#[case(TaskStatus::Open, TaskStatus::Accepted, true)]
#[case(TaskStatus::Open, TaskStatus::Completed, false)]
#[case(TaskStatus::Open, TaskStatus::Verified, false)]
#[case(TaskStatus::Accepted, TaskStatus::Open, false)]
#[case(TaskStatus::Accepted, TaskStatus::Accepted, false)]
#[case(TaskStatus::Accepted, TaskStatus::Completed, true)]
#[case(TaskStatus::Accepted, TaskStatus::Verified, false)]
#[case(TaskStatus::Completed, TaskStatus::Open, false)]
#[case(TaskStatus::Completed, TaskStatus::Accepted, false)]
#[case(TaskStatus::Completed, TaskStatus::Completed, false)]
#[case(TaskStatus::Completed, TaskStatus::Verified, true)]
#[case(TaskStatus::Verified, TaskStatus::Open, false)]
#[case(TaskStatus::Verified, TaskStatus::Accepted, false)]
#[case(TaskStatus::Verified, TaskStatus::Completed, false)]
#[case(TaskStatus::Verified, TaskStatus::Verified, false)]
fn can_transition_to_returns_expected(
    #[case] from: TaskStatus,
    #[case] to: TaskStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
#[case(TaskStatus::Open, false)]
#[case(TaskStatus::Accepted, false)]
#[case(TaskStatus::Completed, false)]
#[case(TaskStatus::Verified, true)]
fn is_terminal_returns_expected(#[case] status: TaskStatus, #[case] expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}

#[rstest]
#[case(TaskStatus::Open, "open")]
#[case(TaskStatus::Accepted, "accepted")]
#[case(TaskStatus::Completed, "completed")]
#[case(TaskStatus::Verified, "verified")]
fn as_str_round_trips_through_try_from(#[case] status: TaskStatus, #[case] text: &str) {
    assert_eq!(status.as_str(), text);
    assert_eq!(TaskStatus::try_from(text), Ok(status));
}

#[rstest]
fn try_from_normalises_case_and_whitespace() {
    assert_eq!(TaskStatus::try_from("  Accepted "), Ok(TaskStatus::Accepted));
}

#[rstest]
fn try_from_rejects_unknown_status() {
    assert!(TaskStatus::try_from("cancelled").is_err());
}
