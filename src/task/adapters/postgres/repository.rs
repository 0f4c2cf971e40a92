//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::directory::domain::RollNumber;
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_from(&self, task: &Task, expected: TaskStatus) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changes = to_changeset(task);

        self.run_blocking(move |connection| {
            let row_id = task_id.into_inner();
            // Conditional update: the write only lands while the stored row
            // still matches what the caller read. Claims additionally demand
            // an unset acceptor so two racing claims cannot both win.
            let updated = match expected {
                TaskStatus::Open => diesel::update(
                    tasks::table
                        .filter(tasks::id.eq(row_id))
                        .filter(tasks::status.eq(expected.as_str()))
                        .filter(tasks::accepted_by.is_null()),
                )
                .set(&changes)
                .execute(connection),
                _ => diesel::update(
                    tasks::table
                        .filter(tasks::id.eq(row_id))
                        .filter(tasks::status.eq(expected.as_str())),
                )
                .set(&changes)
                .execute(connection),
            }
            .map_err(TaskRepositoryError::persistence)?;

            if updated == 0 {
                let exists = diesel::select(diesel::dsl::exists(
                    tasks::table.filter(tasks::id.eq(row_id)),
                ))
                .get_result::<bool>(connection)
                .map_err(TaskRepositoryError::persistence)?;
                if exists {
                    return Err(TaskRepositoryError::StaleState { task_id, expected });
                }
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_open(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::status.eq(TaskStatus::Open.as_str()))
                .filter(tasks::accepted_by.is_null())
                .select(TaskRow::as_select())
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_posted_by(&self, poster: &RollNumber) -> TaskRepositoryResult<Vec<Task>> {
        let handle = poster.clone();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::posted_by.eq(handle.as_str()))
                .select(TaskRow::as_select())
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_accepted_by(&self, acceptor: &RollNumber) -> TaskRepositoryResult<Vec<Task>> {
        let handle = acceptor.clone();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::accepted_by.eq(handle.as_str()))
                .select(TaskRow::as_select())
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        request: task.request().to_owned(),
        deadline: task.deadline(),
        reward: task.reward().to_owned(),
        posted_by: task.posted_by().as_str().to_owned(),
        posted_by_name: task.posted_by_name().to_owned(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        accepted_by: task.accepted_by().map(|handle| handle.as_str().to_owned()),
        accepted_by_name: task.accepted_by_name().map(ToOwned::to_owned),
        status: task.status().as_str().to_owned(),
        file_link: task.file_link().map(ToOwned::to_owned),
        completed_at: task.completed_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let posted_by = RollNumber::new(row.posted_by).map_err(TaskRepositoryError::persistence)?;
    let accepted_by = row
        .accepted_by
        .map(RollNumber::new)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        request: row.request,
        deadline: row.deadline,
        reward: row.reward,
        posted_by,
        posted_by_name: row.posted_by_name,
        accepted_by,
        accepted_by_name: row.accepted_by_name,
        status,
        file_link: row.file_link,
        completed_at: row.completed_at,
        created_at: row.created_at,
    };
    Ok(Task::from_persisted(data))
}
