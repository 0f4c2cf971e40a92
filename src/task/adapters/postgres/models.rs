//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Free-text request description.
    pub request: String,
    /// Completion deadline.
    pub deadline: DateTime<Utc>,
    /// Free-text reward description.
    pub reward: String,
    /// Poster roll number.
    pub posted_by: String,
    /// Poster display name.
    pub posted_by_name: String,
    /// Acceptor roll number, if claimed.
    pub accepted_by: Option<String>,
    /// Acceptor display name, if claimed.
    pub accepted_by_name: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Deliverable reference, if completed with one.
    pub file_link: Option<String>,
    /// Completion timestamp, if completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Free-text request description.
    pub request: String,
    /// Completion deadline.
    pub deadline: DateTime<Utc>,
    /// Free-text reward description.
    pub reward: String,
    /// Poster roll number.
    pub posted_by: String,
    /// Poster display name.
    pub posted_by_name: String,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Changeset covering every lifecycle-mutable column.
///
/// `treat_none_as_null` keeps the write total: a `None` here clears the
/// column rather than skipping it.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks, treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Acceptor roll number.
    pub accepted_by: Option<String>,
    /// Acceptor display name.
    pub accepted_by_name: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Deliverable reference.
    pub file_link: Option<String>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}
