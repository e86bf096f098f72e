//! Use-case layer for the task lifecycle.
//!
//! The service is the only component that constructs or mutates tasks. The
//! write path triggers a best-effort due-soon notification after
//! persistence completes; a notification failure never rolls back a write.

use crate::task::{
    domain::{
        Task, TaskChanges, TaskId, TaskStatus, TaskValidationError, validate_description,
        validate_title,
    },
    ports::{NotificationQueue, TaskRepository, TaskRepositoryError},
    services::NotificationService,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Service-level errors for task use-cases.
///
/// `NotFound`, `InvalidData`, and `Validation` are recoverable by the
/// caller (boundary 4xx); `Repository` is the only unexpected class.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// No task matches the identifier. A blank or malformed identifier is
    /// indistinguishable from a missing task.
    #[error("task not found: {0}")]
    NotFound(String),

    /// Input rejected by the use-case pre-checks, before any entity is
    /// constructed.
    #[error("invalid task data: {0}")]
    InvalidData(TaskValidationError),

    /// Entity construction rejected the resulting state. Reached when a
    /// constraint escapes the pre-checks, such as a due date before the
    /// creation date.
    #[error("task validation failed: {0}")]
    Validation(#[from] TaskValidationError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task lifecycle orchestration service.
pub struct TaskService<R, Q, C>
where
    R: TaskRepository,
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    notifications: NotificationService<Q, C>,
    clock: Arc<C>,
}

impl<R, Q, C> Clone for TaskService<R, Q, C>
where
    R: TaskRepository,
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            notifications: self.notifications.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, Q, C> TaskService<R, Q, C>
where
    R: TaskRepository,
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub fn new(repository: Arc<R>, queue: Arc<Q>, clock: Arc<C>) -> Self {
        Self {
            repository,
            notifications: NotificationService::new(queue, Arc::clone(&clock)),
            clock,
        }
    }

    /// Creates and persists a new pending task.
    ///
    /// When the saved task has a due date within the next 24 hours, a
    /// notification is enqueued best-effort after persistence.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidData`] when the title or
    /// description violates the domain limits, and
    /// [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        validate_title(&request.title).map_err(TaskServiceError::InvalidData)?;
        if let Some(description) = &request.description {
            validate_description(description).map_err(TaskServiceError::InvalidData)?;
        }

        let task = Task::create(
            request.title,
            request.description,
            request.due_date,
            &*self.clock,
        )?;
        let saved = self.repository.save(&task).await?;
        self.notify_if_due_soon(&saved).await;
        Ok(saved)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the identifier is blank,
    /// malformed, or matches no task.
    pub async fn get_by_id(&self, id: &str) -> TaskServiceResult<Task> {
        let task_id =
            TaskId::parse(id).ok_or_else(|| TaskServiceError::NotFound(id.to_owned()))?;
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| TaskServiceError::NotFound(id.to_owned()))
    }

    /// Lists tasks, optionally restricted to a single status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the listing fails.
    pub async fn get_all(&self, status: Option<TaskStatus>) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.find_all(status).await?)
    }

    /// Applies a change set to an existing task.
    ///
    /// Only fields actually being changed are pre-validated; omitted fields
    /// bypass the checks and clearing the description is always allowed.
    /// The saved task goes through the same due-soon notification check as
    /// `create`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] for a bad identifier or
    /// missing task, [`TaskServiceError::InvalidData`] for pre-check
    /// failures, and [`TaskServiceError::Validation`] when the resulting
    /// entity state is invalid.
    pub async fn update(&self, id: &str, changes: TaskChanges) -> TaskServiceResult<Task> {
        let task_id =
            TaskId::parse(id).ok_or_else(|| TaskServiceError::NotFound(id.to_owned()))?;
        let existing = self
            .repository
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| TaskServiceError::NotFound(id.to_owned()))?;

        if let Some(title) = changes.new_title() {
            validate_title(title).map_err(TaskServiceError::InvalidData)?;
        }
        if let Some(Some(description)) = changes.new_description() {
            validate_description(description).map_err(TaskServiceError::InvalidData)?;
        }

        let updated = existing.with_changes(changes, &*self.clock)?;
        let saved = self.repository.save(&updated).await?;
        self.notify_if_due_soon(&saved).await;
        Ok(saved)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the identifier is blank,
    /// malformed, or matches no task.
    pub async fn delete(&self, id: &str) -> TaskServiceResult<()> {
        let task_id =
            TaskId::parse(id).ok_or_else(|| TaskServiceError::NotFound(id.to_owned()))?;
        if !self.repository.exists(task_id).await? {
            return Err(TaskServiceError::NotFound(id.to_owned()));
        }
        Ok(self.repository.delete(task_id).await?)
    }

    /// Enqueues a notification when the task is due within the next 24
    /// hours. Best-effort: enqueue failures are contained by the
    /// notification service.
    async fn notify_if_due_soon(&self, task: &Task) {
        if !task.is_due_within_24_hours(&*self.clock) {
            return;
        }
        let Some(due_date) = task.due_date() else {
            return;
        };
        self.notifications
            .enqueue(task.id(), task.title(), due_date)
            .await;
    }
}
