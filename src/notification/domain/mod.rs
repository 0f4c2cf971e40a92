//! Domain model for lifecycle notifications.
//!
//! A notification is created exactly once per triggering lifecycle event,
//! mutated only to flip its `read` flag, and deleted only in bulk when the
//! task it references is deleted.

mod error;
mod ids;
mod notification;

pub use error::ParseNotificationKindError;
pub use ids::NotificationId;
pub use notification::{Notification, NotificationKind, PersistedNotificationData};
