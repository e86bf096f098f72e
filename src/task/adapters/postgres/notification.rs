//! `PostgreSQL`-backed queue transport for due-soon notifications.

use super::{
    models::{NewNotificationRow, NotificationRow},
    repository::TaskPgPool,
    schema::notifications,
};
use crate::task::ports::{NotificationQueue, NotificationQueueError, NotificationQueueResult};
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed FIFO queue transport.
///
/// Rows carry a database-assigned monotonic sequence number; `pop` removes
/// the lowest sequence for the queue inside a single transaction, giving
/// strict FIFO order.
#[derive(Debug, Clone)]
pub struct PostgresNotificationQueue {
    pool: TaskPgPool,
}

impl PostgresNotificationQueue {
    /// Creates a new queue transport from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> NotificationQueueResult<T>
    where
        F: FnOnce(&mut PgConnection) -> NotificationQueueResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(NotificationQueueError::transport)?;
            f(&mut connection)
        })
        .await
        .map_err(NotificationQueueError::transport)?
    }
}

#[async_trait]
impl NotificationQueue for PostgresNotificationQueue {
    async fn push(&self, queue: &str, payload: &str) -> NotificationQueueResult<()> {
        let row = NewNotificationRow {
            queue: queue.to_owned(),
            payload: payload.to_owned(),
            enqueued_at: Utc::now(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(notifications::table)
                .values(&row)
                .execute(connection)
                .map_err(NotificationQueueError::transport)?;
            Ok(())
        })
        .await
    }

    async fn pop(&self, queue: &str) -> NotificationQueueResult<Option<String>> {
        let queue_name = queue.to_owned();
        self.run_blocking(move |connection| {
            connection
                .transaction::<Option<String>, diesel::result::Error, _>(|txn| {
                    let head = notifications::table
                        .filter(notifications::queue.eq(&queue_name))
                        .order(notifications::seq.asc())
                        .select(NotificationRow::as_select())
                        .first::<NotificationRow>(txn)
                        .optional()?;
                    let Some(row) = head else {
                        return Ok(None);
                    };
                    diesel::delete(notifications::table.filter(notifications::seq.eq(row.seq)))
                        .execute(txn)?;
                    Ok(Some(row.payload))
                })
                .map_err(NotificationQueueError::transport)
        })
        .await
    }
}
