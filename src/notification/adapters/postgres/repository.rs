//! `PostgreSQL` repository implementation for notification storage.

use super::{
    models::{NewNotificationRow, NotificationRow},
    schema::notifications,
};
use crate::directory::domain::RollNumber;
use crate::notification::{
    domain::{Notification, NotificationId, NotificationKind, PersistedNotificationData},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by notification adapters.
pub type NotificationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed notification repository.
#[derive(Debug, Clone)]
pub struct PostgresNotificationRepository {
    pool: NotificationPgPool,
}

impl PostgresNotificationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: NotificationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> NotificationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> NotificationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(NotificationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(NotificationRepositoryError::persistence)?
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let notification_id = notification.id();
        let new_row = to_new_row(notification);

        self.run_blocking(move |connection| {
            diesel::insert_into(notifications::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        NotificationRepositoryError::DuplicateNotification(notification_id)
                    }
                    _ => NotificationRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn store_batch(&self, batch: &[Notification]) -> NotificationRepositoryResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let rows: Vec<NewNotificationRow> = batch.iter().map(to_new_row).collect();

        self.run_blocking(move |connection| {
            diesel::insert_into(notifications::table)
                .values(&rows)
                .execute(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list_for_receiver(
        &self,
        receiver: &RollNumber,
        limit: usize,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let handle = receiver.clone();
        let capped = i64::try_from(limit).map_err(NotificationRepositoryError::persistence)?;
        self.run_blocking(move |connection| {
            let rows = notifications::table
                .filter(notifications::receiver.eq(handle.as_str()))
                .select(NotificationRow::as_select())
                .order((notifications::created_at.desc(), notifications::id.desc()))
                .limit(capped)
                .load::<NotificationRow>(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            rows.into_iter().map(row_to_notification).collect()
        })
        .await
    }

    async fn count_unread(&self, receiver: &RollNumber) -> NotificationRepositoryResult<u64> {
        let handle = receiver.clone();
        self.run_blocking(move |connection| {
            let count: i64 = notifications::table
                .filter(notifications::receiver.eq(handle.as_str()))
                .filter(notifications::read.eq(false))
                .count()
                .get_result(connection)
                .map_err(NotificationRepositoryError::persistence)?;
            u64::try_from(count).map_err(NotificationRepositoryError::persistence)
        })
        .await
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        receiver: &RollNumber,
    ) -> NotificationRepositoryResult<()> {
        let handle = receiver.clone();
        self.run_blocking(move |connection| {
            let row_id = id.into_inner();
            let updated = diesel::update(
                notifications::table
                    .filter(notifications::id.eq(row_id))
                    .filter(notifications::receiver.eq(handle.as_str())),
            )
            .set(notifications::read.eq(true))
            .execute(connection)
            .map_err(NotificationRepositoryError::persistence)?;

            if updated == 0 {
                let exists = diesel::select(diesel::dsl::exists(
                    notifications::table.filter(notifications::id.eq(row_id)),
                ))
                .get_result::<bool>(connection)
                .map_err(NotificationRepositoryError::persistence)?;
                if exists {
                    return Err(NotificationRepositoryError::NotReceiver(id));
                }
                return Err(NotificationRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn mark_all_read(&self, receiver: &RollNumber) -> NotificationRepositoryResult<u64> {
        let handle = receiver.clone();
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                notifications::table
                    .filter(notifications::receiver.eq(handle.as_str()))
                    .filter(notifications::read.eq(false)),
            )
            .set(notifications::read.eq(true))
            .execute(connection)
            .map_err(NotificationRepositoryError::persistence)?;
            u64::try_from(updated).map_err(NotificationRepositoryError::persistence)
        })
        .await
    }

    async fn delete_for_task(&self, task_id: TaskId) -> NotificationRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                notifications::table.filter(notifications::task_id.eq(task_id.into_inner())),
            )
            .execute(connection)
            .map_err(NotificationRepositoryError::persistence)?;
            u64::try_from(deleted).map_err(NotificationRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(notification: &Notification) -> NewNotificationRow {
    NewNotificationRow {
        id: notification.id().into_inner(),
        kind: notification.kind().as_str().to_owned(),
        sender: notification.sender().as_str().to_owned(),
        sender_name: notification.sender_name().to_owned(),
        receiver: notification.receiver().as_str().to_owned(),
        message: notification.message().to_owned(),
        task_id: notification.task_id().into_inner(),
        read: notification.is_read(),
        created_at: notification.created_at(),
    }
}

fn row_to_notification(row: NotificationRow) -> NotificationRepositoryResult<Notification> {
    let kind = NotificationKind::try_from(row.kind.as_str())
        .map_err(NotificationRepositoryError::persistence)?;
    let sender =
        RollNumber::new(row.sender).map_err(NotificationRepositoryError::persistence)?;
    let receiver =
        RollNumber::new(row.receiver).map_err(NotificationRepositoryError::persistence)?;

    let data = PersistedNotificationData {
        id: NotificationId::from_uuid(row.id),
        kind,
        sender,
        sender_name: row.sender_name,
        receiver,
        message: row.message,
        task_id: TaskId::from_uuid(row.task_id),
        read: row.read,
        created_at: row.created_at,
    };
    Ok(Notification::from_persisted(data))
}
