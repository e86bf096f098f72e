//! Repository port for task persistence and lookup.

use crate::task::domain::{ParseTaskStatusError, Task, TaskId, TaskStatus, TaskValidationError};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations are assumed to provide per-row atomicity for save and
/// delete; the use-case layer adds no locking of its own.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores the task, inserting or replacing the row with the same
    /// identifier, and returns the persisted state.
    async fn save(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks, optionally restricted to a single status.
    async fn find_all(&self, status: Option<TaskStatus>) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes the task with the given identifier.
    ///
    /// Deleting an absent identifier is not an error; existence checks are
    /// the caller's concern.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Reports whether a task with the given identifier exists.
    async fn exists(&self, id: TaskId) -> TaskRepositoryResult<bool>;
}

/// Reasons a persisted task row fails to rebuild into a task.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CorruptedRecordError {
    /// The stored status string is not a recognised status.
    #[error(transparent)]
    Status(#[from] ParseTaskStatusError),

    /// The row violates a task invariant.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A persisted row no longer rebuilds into a valid task.
    #[error("corrupted task record {id}: {source}")]
    CorruptedRecord {
        /// Identifier of the offending row.
        id: TaskId,
        /// The failure found while rebuilding the row.
        source: CorruptedRecordError,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
