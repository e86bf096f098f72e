//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type shared by the task adapters.
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
    async fn save(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let row = to_row(task);
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .on_conflict(tasks::id)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await?;
        Ok(task.clone())
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

    async fn find_all(&self, status: Option<TaskStatus>) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .select(TaskRow::as_select())
                .order(tasks::created_at.asc())
                .into_boxed();
            if let Some(wanted) = status {
                query = query.filter(tasks::status.eq(wanted.as_str()));
            }
            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn exists(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(
                tasks::table.filter(tasks::id.eq(id.into_inner())),
            ))
            .get_result::<bool>(connection)
            .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn to_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        due_date: task.due_date(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let id = TaskId::from_uuid(row.id);
    let status = TaskStatus::try_from(row.status.as_str()).map_err(|source| {
        TaskRepositoryError::CorruptedRecord {
            id,
            source: source.into(),
        }
    })?;
    Task::reconstitute(PersistedTaskData {
        id,
        title: row.title,
        description: row.description,
        due_date: row.due_date,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|source| TaskRepositoryError::CorruptedRecord {
        id,
        source: source.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::{TaskRow, row_to_task};
    use crate::task::ports::{CorruptedRecordError, TaskRepositoryError};
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    fn row(title: &str, status: &str) -> TaskRow {
        TaskRow {
            id: Uuid::new_v4(),
            title: title.to_owned(),
            description: None,
            due_date: None,
            status: status.to_owned(),
            created_at: instant(),
            updated_at: instant(),
        }
    }

    #[test]
    fn valid_row_rebuilds_into_a_task() {
        let task = row_to_task(row("Task", "pending")).expect("valid row");
        assert_eq!(task.title(), "Task");
    }

    #[test]
    fn unknown_status_surfaces_as_corrupted_record() {
        let bad_row = row("Task", "archived");
        let expected = bad_row.id;
        let err = row_to_task(bad_row).expect_err("unknown status must fail");
        assert!(matches!(
            err,
            TaskRepositoryError::CorruptedRecord {
                id,
                source: CorruptedRecordError::Status(_),
            } if id.into_inner() == expected
        ));
    }

    #[test]
    fn invalid_row_surfaces_as_corrupted_record() {
        let err = row_to_task(row("", "pending")).expect_err("blank title must fail");
        assert!(matches!(
            err,
            TaskRepositoryError::CorruptedRecord {
                source: CorruptedRecordError::Validation(_),
                ..
            }
        ));
    }
}
