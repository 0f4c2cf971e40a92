//! End-to-end exchange scenario across four users.

use super::helpers::{Exchange, actor, exchange, future_deadline, handle, post_task};
use brinx_core::notification::domain::NotificationKind;
use brinx_core::task::{
    domain::{RewardSignal, TaskDomainError, TaskStatus},
    services::{ON_TIME_POINTS, TaskLifecycleError},
};
use rstest::rstest;

/// Walks a task from posting to verification and checks every side effect
/// along the way: broadcast delivery, claim exclusivity, the points award,
/// reward confirmation, and the delete cascade.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_task_travels_the_full_lifecycle(exchange: Exchange) {
    let asha = actor("21BCE1001", "Asha Rao");
    let bilal = actor("21BCE1002", "Bilal Khan");
    let chitra = actor("21BCE1003", "Chitra Nair");

    // Asha posts an errand; everyone else hears about it.
    let task = post_task(
        &exchange,
        &asha,
        "Collect my courier from the main gate before 6pm",
        future_deadline(),
    )
    .await;
    for roll in ["21BCE1002", "21BCE1003", "21BCE1004"] {
        let page = exchange
            .inbox
            .inbox(&handle(roll))
            .await
            .expect("inbox should succeed");
        assert_eq!(page.unread_count(), 1, "inbox of {roll}");
    }

    // Bilal claims it; Chitra arrives second and is turned away.
    let accepted = exchange
        .service
        .accept_task(&bilal, task.id())
        .await
        .expect("first claim should succeed");
    assert_eq!(accepted.status(), TaskStatus::Accepted);
    let late_claim = exchange.service.accept_task(&chitra, task.id()).await;
    assert!(matches!(
        late_claim,
        Err(TaskLifecycleError::Domain(TaskDomainError::AlreadyClaimed(_)))
    ));

    // Bilal delivers before the deadline and earns the award.
    let (completed, awarded) = exchange
        .service
        .complete_task(
            &bilal,
            task.id(),
            Some("https://drive.example/parcel-photo".to_owned()),
        )
        .await
        .expect("completion should succeed");
    assert_eq!(completed.status(), TaskStatus::Completed);
    assert_eq!(awarded, ON_TIME_POINTS);

    // The reward takes a nudge before it arrives.
    exchange
        .service
        .set_reward_status(&bilal, task.id(), RewardSignal::NotReceived)
        .await
        .expect("reminder should succeed");
    let verified = exchange
        .service
        .set_reward_status(&bilal, task.id(), RewardSignal::Received)
        .await
        .expect("confirmation should succeed");
    assert_eq!(verified.status(), TaskStatus::Verified);

    // Asha's inbox now tells the whole story.
    let asha_page = exchange
        .inbox
        .inbox(asha.handle())
        .await
        .expect("inbox should succeed");
    let kinds: Vec<NotificationKind> = asha_page
        .notifications()
        .iter()
        .map(brinx_core::notification::domain::Notification::kind)
        .collect();
    assert!(kinds.contains(&NotificationKind::TaskAccepted));
    assert!(kinds.contains(&NotificationKind::TaskCompleted));
    assert!(kinds.contains(&NotificationKind::RewardReminder));
    assert!(kinds.contains(&NotificationKind::RewardConfirmed));

    // Bilal tops the leaderboard.
    let top = exchange
        .service
        .clone()
        .with_leaderboard_size(1)
        .leaderboard()
        .await
        .expect("leaderboard should succeed");
    let leader = top.first().expect("one leader expected");
    assert_eq!(leader.handle(), bilal.handle());
    assert_eq!(leader.points(), ON_TIME_POINTS);

    // Asha archives the verified task; every trace of it disappears.
    exchange
        .service
        .delete_task(&asha, task.id())
        .await
        .expect("deletion should succeed");
    for roll in ["21BCE1001", "21BCE1002", "21BCE1003", "21BCE1004"] {
        let page = exchange
            .inbox
            .inbox(&handle(roll))
            .await
            .expect("inbox should succeed");
        assert!(
            page.notifications().is_empty(),
            "inbox of {roll} should be empty after the cascade"
        );
    }
}
