//! Shared test helpers for in-memory integration tests.

use brinx_core::directory::{
    adapters::memory::InMemoryUserDirectory,
    domain::{Actor, RollNumber, UserProfile},
};
use brinx_core::notification::{
    adapters::memory::InMemoryNotificationRepository,
    services::{InboxService, NotificationFanout},
};
use brinx_core::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{PostTaskRequest, TaskLifecycleService},
};
use chrono::{DateTime, Duration, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Lifecycle service wired over the in-memory adapters.
pub type TestService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryNotificationRepository,
    InMemoryUserDirectory,
    DefaultClock,
>;

/// Full exchange wiring with handles to the backing stores.
pub struct Exchange {
    /// Lifecycle service under test.
    pub service: TestService,
    /// Inbox service sharing the notification store.
    pub inbox: InboxService<InMemoryNotificationRepository>,
    /// Backing task repository for direct inspection.
    pub tasks: Arc<InMemoryTaskRepository>,
    /// Backing notification repository for direct inspection.
    pub notifications: Arc<InMemoryNotificationRepository>,
    /// Backing user directory for seeding and inspection.
    pub directory: Arc<InMemoryUserDirectory>,
}

/// Campus population seeded into every exchange fixture.
pub const SEEDED_USERS: [(&str, &str); 4] = [
    ("21BCE1001", "Asha Rao"),
    ("21BCE1002", "Bilal Khan"),
    ("21BCE1003", "Chitra Nair"),
    ("21BCE1004", "Dev Iyer"),
];

/// Provides a fresh exchange seeded with [`SEEDED_USERS`] at zero points.
#[fixture]
pub fn exchange() -> Exchange {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let notifications = Arc::new(InMemoryNotificationRepository::new());
    let directory = Arc::new(InMemoryUserDirectory::new());
    let clock = Arc::new(DefaultClock);

    for (roll, name) in SEEDED_USERS {
        directory
            .seed(UserProfile::new(
                RollNumber::new(roll).expect("valid roll number"),
                name.to_owned(),
                0,
            ))
            .expect("seed should succeed");
    }

    let fanout = NotificationFanout::new(Arc::clone(&notifications), Arc::clone(&clock));
    let service = TaskLifecycleService::new(
        Arc::clone(&tasks),
        Arc::clone(&directory),
        fanout,
        clock,
    );
    let inbox = InboxService::new(Arc::clone(&notifications));
    Exchange {
        service,
        inbox,
        tasks,
        notifications,
        directory,
    }
}

/// Builds a validated actor from a roll number and display name.
pub fn actor(roll: &str, name: &str) -> Actor {
    Actor::new(roll, name).expect("valid actor")
}

/// Builds a validated roll number.
pub fn handle(roll: &str) -> RollNumber {
    RollNumber::new(roll).expect("valid roll number")
}

/// Returns a deadline comfortably in the future.
pub fn future_deadline() -> DateTime<Utc> {
    Utc::now() + Duration::days(2)
}

/// Returns a deadline already in the past.
pub fn past_deadline() -> DateTime<Utc> {
    Utc::now() - Duration::days(2)
}

/// Posts a task as the given actor and returns it.
pub async fn post_task(
    exchange: &Exchange,
    poster: &Actor,
    request: &str,
    deadline: DateTime<Utc>,
) -> Task {
    exchange
        .service
        .post_task(
            poster,
            PostTaskRequest::new(request, deadline, "Canteen coffee"),
        )
        .await
        .expect("posting should succeed")
}
