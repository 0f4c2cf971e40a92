//! `PostgreSQL` implementation of the user directory port.

use super::{models::UserRow, schema::users};
use crate::directory::{
    domain::{RollNumber, UserProfile},
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by directory adapters.
pub type DirectoryPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user directory.
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    pool: DirectoryPgPool,
}

impl PostgresUserDirectory {
    /// Creates a new directory adapter from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DirectoryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserDirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserDirectoryError::persistence)?
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find(&self, handle: &RollNumber) -> UserDirectoryResult<Option<UserProfile>> {
        let lookup = handle.clone();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::roll_number.eq(lookup.as_str()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserDirectoryError::persistence)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn list_handles_except(
        &self,
        excluded: &RollNumber,
    ) -> UserDirectoryResult<Vec<RollNumber>> {
        let excluded_handle = excluded.clone();
        self.run_blocking(move |connection| {
            let handles = users::table
                .filter(users::roll_number.ne(excluded_handle.as_str()))
                .select(users::roll_number)
                .order(users::roll_number.asc())
                .load::<String>(connection)
                .map_err(UserDirectoryError::persistence)?;
            handles
                .into_iter()
                .map(|raw| RollNumber::new(raw).map_err(UserDirectoryError::persistence))
                .collect()
        })
        .await
    }

    async fn add_points(&self, handle: &RollNumber, delta: i64) -> UserDirectoryResult<()> {
        let target = handle.clone();
        self.run_blocking(move |connection| {
            // Single in-place increment; correct under concurrent completions.
            let updated = diesel::update(
                users::table.filter(users::roll_number.eq(target.as_str())),
            )
            .set(users::points.eq(users::points + delta))
            .execute(connection)
            .map_err(UserDirectoryError::persistence)?;

            if updated == 0 {
                return Err(UserDirectoryError::UnknownUser(target.clone()));
            }
            Ok(())
        })
        .await
    }

    async fn top_by_points(&self, limit: usize) -> UserDirectoryResult<Vec<UserProfile>> {
        let capped = i64::try_from(limit).map_err(UserDirectoryError::persistence)?;
        self.run_blocking(move |connection| {
            let rows = users::table
                .select(UserRow::as_select())
                .order((users::points.desc(), users::roll_number.asc()))
                .limit(capped)
                .load::<UserRow>(connection)
                .map_err(UserDirectoryError::persistence)?;
            rows.into_iter().map(row_to_profile).collect()
        })
        .await
    }
}

fn row_to_profile(row: UserRow) -> UserDirectoryResult<UserProfile> {
    let handle = RollNumber::new(row.roll_number).map_err(UserDirectoryError::persistence)?;
    Ok(UserProfile::new(handle, row.name, row.points))
}
