//! In-memory integration tests for concurrent lifecycle operations.

use super::helpers::{Exchange, actor, exchange, future_deadline, post_task};
use brinx_core::directory::ports::UserDirectory;
use brinx_core::task::{
    domain::{Task, TaskDomainError},
    ports::TaskRepository,
    services::TaskLifecycleError,
};
use rstest::rstest;

type AcceptResult = Result<Task, TaskLifecycleError>;

fn is_already_claimed(result: &AcceptResult) -> bool {
    matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::AlreadyClaimed(_)))
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_claims_resolve_to_exactly_one_winner(exchange: Exchange) {
    let asha = actor("21BCE1001", "Asha Rao");
    let bilal = actor("21BCE1002", "Bilal Khan");
    let chitra = actor("21BCE1003", "Chitra Nair");
    let task = post_task(&exchange, &asha, "Collect my courier", future_deadline()).await;

    let first = exchange.service.clone();
    let second = exchange.service.clone();
    let task_id = task.id();
    let bilal_claim = {
        let bilal = bilal.clone();
        tokio::spawn(async move { first.accept_task(&bilal, task_id).await })
    };
    let chitra_claim = {
        let chitra = chitra.clone();
        tokio::spawn(async move { second.accept_task(&chitra, task_id).await })
    };

    let (bilal_join, chitra_join) = tokio::join!(bilal_claim, chitra_claim);
    let bilal_result = bilal_join.expect("claim task should not panic");
    let chitra_result = chitra_join.expect("claim task should not panic");

    let winners = [&bilal_result, &chitra_result]
        .iter()
        .filter(|result| result.is_ok())
        .count();
    assert_eq!(winners, 1, "exactly one claim must win");
    assert!(
        is_already_claimed(&bilal_result) || is_already_claimed(&chitra_result),
        "the losing claim must see the task as already claimed"
    );

    let stored = exchange
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    let winner = if bilal_result.is_ok() { bilal } else { chitra };
    assert_eq!(stored.accepted_by(), Some(winner.handle()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_point_awards_all_land(exchange: Exchange) {
    let bilal = actor("21BCE1002", "Bilal Khan");

    let mut awards = Vec::new();
    for _ in 0..10 {
        let directory = std::sync::Arc::clone(&exchange.directory);
        let handle = bilal.handle().clone();
        awards.push(tokio::spawn(async move {
            directory.add_points(&handle, 10).await
        }));
    }
    for award in awards {
        award
            .await
            .expect("award task should not panic")
            .expect("award should succeed");
    }

    let profile = exchange
        .directory
        .find(bilal.handle())
        .await
        .expect("lookup should succeed")
        .expect("profile should exist");
    assert_eq!(profile.points(), 100);
}
