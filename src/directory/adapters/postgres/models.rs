//! Diesel row models for directory reads.

use super::schema::users;
use diesel::prelude::*;

/// Query result row for user profiles.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Unique campus roll number.
    pub roll_number: String,
    /// Display name.
    pub name: String,
    /// Accumulated points.
    pub points: i64,
}
