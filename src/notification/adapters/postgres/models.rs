//! Diesel row models for notification persistence.

use super::schema::notifications;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for notification records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationRow {
    /// Internal notification identifier.
    pub id: uuid::Uuid,
    /// Lifecycle event kind.
    pub kind: String,
    /// Sender roll number.
    pub sender: String,
    /// Sender display name.
    pub sender_name: String,
    /// Receiver roll number.
    pub receiver: String,
    /// Message text.
    pub message: String,
    /// Referenced task identifier.
    pub task_id: uuid::Uuid,
    /// Whether the receiver has read the record.
    pub read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for notification records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotificationRow {
    /// Internal notification identifier.
    pub id: uuid::Uuid,
    /// Lifecycle event kind.
    pub kind: String,
    /// Sender roll number.
    pub sender: String,
    /// Sender display name.
    pub sender_name: String,
    /// Receiver roll number.
    pub receiver: String,
    /// Message text.
    pub message: String,
    /// Referenced task identifier.
    pub task_id: uuid::Uuid,
    /// Whether the receiver has read the record.
    pub read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
