//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Exchange, actor, exchange, future_deadline, past_deadline, post_task};
use brinx_core::directory::ports::UserDirectory;
use brinx_core::task::{
    domain::{RewardSignal, TaskDomainError, TaskId, TaskStatus},
    ports::TaskRepository,
    services::{ON_TIME_POINTS, TaskLifecycleError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn posted_task_appears_in_open_and_posted_listings(exchange: Exchange) {
    let asha = actor("21BCE1001", "Asha Rao");
    let task = post_task(&exchange, &asha, "Collect my courier", future_deadline()).await;

    let open = exchange
        .service
        .list_open_tasks()
        .await
        .expect("open listing should succeed");
    assert!(open.iter().any(|entry| entry.task().id() == task.id()));

    let posted = exchange
        .service
        .list_posted_tasks(asha.handle())
        .await
        .expect("posted listing should succeed");
    assert_eq!(posted.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn accepted_task_leaves_the_open_listing(exchange: Exchange) {
    let asha = actor("21BCE1001", "Asha Rao");
    let bilal = actor("21BCE1002", "Bilal Khan");
    let task = post_task(&exchange, &asha, "Collect my courier", future_deadline()).await;

    exchange
        .service
        .accept_task(&bilal, task.id())
        .await
        .expect("acceptance should succeed");

    let open = exchange
        .service
        .list_open_tasks()
        .await
        .expect("open listing should succeed");
    assert!(open.iter().all(|entry| entry.task().id() != task.id()));

    let accepted = exchange
        .service
        .list_accepted_tasks(bilal.handle())
        .await
        .expect("accepted listing should succeed");
    assert_eq!(accepted.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn on_time_completion_awards_points_once(exchange: Exchange) {
    let asha = actor("21BCE1001", "Asha Rao");
    let bilal = actor("21BCE1002", "Bilal Khan");
    let task = post_task(&exchange, &asha, "Collect my courier", future_deadline()).await;
    exchange
        .service
        .accept_task(&bilal, task.id())
        .await
        .expect("acceptance should succeed");

    let (completed, awarded) = exchange
        .service
        .complete_task(&bilal, task.id(), Some("https://drive.example/proof".to_owned()))
        .await
        .expect("completion should succeed");
    assert_eq!(awarded, ON_TIME_POINTS);
    assert_eq!(completed.status(), TaskStatus::Completed);

    // A second completion attempt is rejected and must not award again.
    let repeat = exchange.service.complete_task(&bilal, task.id(), None).await;
    assert!(matches!(
        repeat,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::InvalidStatusTransition { .. }
        ))
    ));

    let profile = exchange
        .directory
        .find(bilal.handle())
        .await
        .expect("lookup should succeed")
        .expect("profile should exist");
    assert_eq!(profile.points(), ON_TIME_POINTS);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn late_completion_awards_no_points(exchange: Exchange) {
    let asha = actor("21BCE1001", "Asha Rao");
    let bilal = actor("21BCE1002", "Bilal Khan");
    let task = post_task(&exchange, &asha, "Collect my courier", past_deadline()).await;
    exchange
        .service
        .accept_task(&bilal, task.id())
        .await
        .expect("acceptance should succeed");

    let (_, awarded) = exchange
        .service
        .complete_task(&bilal, task.id(), None)
        .await
        .expect("completion should succeed");
    assert_eq!(awarded, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reward_confirmation_reaches_the_terminal_status(exchange: Exchange) {
    let asha = actor("21BCE1001", "Asha Rao");
    let bilal = actor("21BCE1002", "Bilal Khan");
    let task = post_task(&exchange, &asha, "Collect my courier", future_deadline()).await;
    exchange
        .service
        .accept_task(&bilal, task.id())
        .await
        .expect("acceptance should succeed");
    exchange
        .service
        .complete_task(&bilal, task.id(), None)
        .await
        .expect("completion should succeed");

    let verified = exchange
        .service
        .set_reward_status(&bilal, task.id(), RewardSignal::Received)
        .await
        .expect("reward confirmation should succeed");
    assert_eq!(verified.status(), TaskStatus::Verified);

    // Verified is terminal: a further reward signal is rejected.
    let repeat = exchange
        .service
        .set_reward_status(&bilal, task.id(), RewardSignal::Received)
        .await;
    assert!(matches!(
        repeat,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::RewardNotReportable { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_may_not_skip_forward(exchange: Exchange) {
    let asha = actor("21BCE1001", "Asha Rao");
    let bilal = actor("21BCE1002", "Bilal Khan");
    let task = post_task(&exchange, &asha, "Collect my courier", future_deadline()).await;

    // Completing an open task skips the accepted step.
    let complete_result = exchange.service.complete_task(&bilal, task.id(), None).await;
    assert!(matches!(
        complete_result,
        Err(TaskLifecycleError::Domain(TaskDomainError::NotAssignee(_)))
    ));

    // Reporting a reward on an open task skips two steps.
    let reward_result = exchange
        .service
        .set_reward_status(&bilal, task.id(), RewardSignal::Received)
        .await;
    assert!(matches!(
        reward_result,
        Err(TaskLifecycleError::Domain(TaskDomainError::NotAssignee(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deletion_is_reserved_for_the_poster(exchange: Exchange) {
    let asha = actor("21BCE1001", "Asha Rao");
    let bilal = actor("21BCE1002", "Bilal Khan");
    let task = post_task(&exchange, &asha, "Collect my courier", future_deadline()).await;

    let result = exchange.service.delete_task(&bilal, task.id()).await;
    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::NotPoster(_)))
    ));

    exchange
        .service
        .delete_task(&asha, task.id())
        .await
        .expect("deletion by the poster should succeed");
    let stored = exchange
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed");
    assert!(stored.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn operations_on_missing_tasks_report_not_found(exchange: Exchange) {
    let bilal = actor("21BCE1002", "Bilal Khan");
    let missing = TaskId::new();

    let accept = exchange.service.accept_task(&bilal, missing).await;
    assert!(matches!(accept, Err(TaskLifecycleError::NotFound(_))));

    let complete = exchange.service.complete_task(&bilal, missing, None).await;
    assert!(matches!(complete, Err(TaskLifecycleError::NotFound(_))));

    let delete = exchange.service.delete_task(&bilal, missing).await;
    assert!(matches!(delete, Err(TaskLifecycleError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn leaderboard_reflects_awarded_points(exchange: Exchange) {
    let asha = actor("21BCE1001", "Asha Rao");
    let bilal = actor("21BCE1002", "Bilal Khan");
    let chitra = actor("21BCE1003", "Chitra Nair");

    for acceptor in [&bilal, &chitra] {
        let task = post_task(&exchange, &asha, "Collect my courier", future_deadline()).await;
        exchange
            .service
            .accept_task(acceptor, task.id())
            .await
            .expect("acceptance should succeed");
        exchange
            .service
            .complete_task(acceptor, task.id(), None)
            .await
            .expect("completion should succeed");
    }
    // Bilal completes a second errand and pulls ahead.
    let task = post_task(&exchange, &asha, "Return my library books", future_deadline()).await;
    exchange
        .service
        .accept_task(&bilal, task.id())
        .await
        .expect("acceptance should succeed");
    exchange
        .service
        .complete_task(&bilal, task.id(), None)
        .await
        .expect("completion should succeed");

    let top = exchange
        .service
        .clone()
        .with_leaderboard_size(2)
        .leaderboard()
        .await
        .expect("leaderboard should succeed");
    let handles: Vec<&str> = top.iter().map(|p| p.handle().as_str()).collect();
    assert_eq!(handles, vec!["21BCE1002", "21BCE1003"]);
}
