//! `PostgreSQL` adapters for task persistence and notification transport.

mod models;
mod notification;
mod repository;
mod schema;

pub use notification::PostgresNotificationQueue;
pub use repository::{PostgresTaskRepository, TaskPgPool};
