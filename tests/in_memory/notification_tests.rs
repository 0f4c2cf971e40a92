//! In-memory integration tests for fanout delivery and inbox behaviour.

use super::helpers::{Exchange, actor, exchange, future_deadline, handle, post_task};
use brinx_core::notification::domain::NotificationKind;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn posting_broadcasts_to_everyone_but_the_poster(exchange: Exchange) {
    let asha = actor("21BCE1001", "Asha Rao");
    post_task(&exchange, &asha, "Collect my courier", future_deadline()).await;

    for roll in ["21BCE1002", "21BCE1003", "21BCE1004"] {
        let page = exchange
            .inbox
            .inbox(&handle(roll))
            .await
            .expect("inbox should succeed");
        assert_eq!(page.notifications().len(), 1, "inbox of {roll}");
        assert_eq!(page.unread_count(), 1);
        let record = page.notifications().first().expect("one record expected");
        assert_eq!(record.kind(), NotificationKind::TaskPosted);
        assert_eq!(record.sender(), asha.handle());
    }

    let own = exchange
        .inbox
        .inbox(asha.handle())
        .await
        .expect("inbox should succeed");
    assert!(own.notifications().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lifecycle_events_land_in_the_posters_inbox(exchange: Exchange) {
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
    exchange
        .service
        .set_reward_status(&bilal, task.id(), brinx_core::task::domain::RewardSignal::Received)
        .await
        .expect("reward confirmation should succeed");

    let page = exchange
        .inbox
        .inbox(asha.handle())
        .await
        .expect("inbox should succeed");
    let kinds: Vec<NotificationKind> = page
        .notifications()
        .iter()
        .map(brinx_core::notification::domain::Notification::kind)
        .collect();
    assert_eq!(kinds.len(), 3);
    assert!(kinds.contains(&NotificationKind::TaskAccepted));
    assert!(kinds.contains(&NotificationKind::TaskCompleted));
    assert!(kinds.contains(&NotificationKind::RewardConfirmed));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reading_notifications_clears_the_unread_count(exchange: Exchange) {
    let asha = actor("21BCE1001", "Asha Rao");
    post_task(&exchange, &asha, "Collect my courier", future_deadline()).await;
    post_task(&exchange, &asha, "Print my assignment", future_deadline()).await;

    let bilal = handle("21BCE1002");
    let initial = exchange
        .inbox
        .inbox(&bilal)
        .await
        .expect("inbox should succeed");
    assert_eq!(initial.unread_count(), 2);

    let first = initial.notifications().first().expect("record expected");
    exchange
        .inbox
        .mark_read(&bilal, first.id())
        .await
        .expect("mark read should succeed");
    let after_one = exchange
        .inbox
        .inbox(&bilal)
        .await
        .expect("inbox should succeed");
    assert_eq!(after_one.unread_count(), 1);

    let updated = exchange
        .inbox
        .mark_all_read(&bilal)
        .await
        .expect("mark all read should succeed");
    assert_eq!(updated, 1);
    let after_all = exchange
        .inbox
        .inbox(&bilal)
        .await
        .expect("inbox should succeed");
    assert_eq!(after_all.unread_count(), 0);

    // The bulk update only touches Bilal's records.
    let chitra = exchange
        .inbox
        .inbox(&handle("21BCE1003"))
        .await
        .expect("inbox should succeed");
    assert_eq!(chitra.unread_count(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_purges_every_related_notification(exchange: Exchange) {
    let asha = actor("21BCE1001", "Asha Rao");
    let bilal = actor("21BCE1002", "Bilal Khan");
    let doomed = post_task(&exchange, &asha, "Collect my courier", future_deadline()).await;
    let kept = post_task(&exchange, &asha, "Print my assignment", future_deadline()).await;
    exchange
        .service
        .accept_task(&bilal, doomed.id())
        .await
        .expect("acceptance should succeed");

    exchange
        .service
        .delete_task(&asha, doomed.id())
        .await
        .expect("deletion should succeed");

    for roll in ["21BCE1001", "21BCE1002", "21BCE1003", "21BCE1004"] {
        let page = exchange
            .inbox
            .inbox(&handle(roll))
            .await
            .expect("inbox should succeed");
        assert!(
            page.notifications()
                .iter()
                .all(|record| record.task_id() == kept.id()),
            "inbox of {roll} should only reference the surviving task"
        );
    }
}
