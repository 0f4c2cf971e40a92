//! In-memory notification repository for tests and embedded use.

mod notification;

pub use notification::InMemoryNotificationRepository;
