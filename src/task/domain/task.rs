//! Task aggregate root: an immutable entity with copy-on-mutate updates.

use super::{ParseTaskStatusError, TaskId, TaskValidationError};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::Serialize;

/// Maximum number of characters accepted in a task title.
pub const TITLE_MAX_CHARS: usize = 255;

/// Maximum number of characters accepted in a task description.
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Work on the task has not finished.
    Pending,
    /// The task has been completed.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
///
/// Instances are immutable: every mutation goes through [`Task::with_changes`]
/// or [`Task::complete`] and produces a new value. Construction always
/// validates, including reconstitution from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for rebuilding a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Field-level change set applied by [`Task::with_changes`].
///
/// Unset fields carry the previous value over unchanged. Description and due
/// date distinguish "leave unchanged" from "clear", since both are optional
/// on the task itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    title: Option<String>,
    description: Option<Option<String>>,
    due_date: Option<Option<DateTime<Utc>>>,
    status: Option<TaskStatus>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Clears the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Clears the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Replaces the lifecycle status.
    #[must_use]
    pub const fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the replacement title, when one is being set.
    #[must_use]
    pub fn new_title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the replacement description, when one is being set.
    ///
    /// The outer `None` means the description is left unchanged; an inner
    /// `None` means it is being cleared.
    #[must_use]
    pub fn new_description(&self) -> Option<Option<&str>> {
        self.description.as_ref().map(Option::as_deref)
    }
}

impl Task {
    /// Creates a new pending task with a generated identifier.
    ///
    /// `created_at` and `updated_at` are both set to the clock's current
    /// time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] when any task invariant is violated.
    pub fn create(
        title: impl Into<String>,
        description: Option<String>,
        due_date: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Result<Self, TaskValidationError> {
        let now = clock.utc();
        let task = Self {
            id: TaskId::new(),
            title: title.into(),
            description,
            due_date,
            status: TaskStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        task.validate()?;
        Ok(task)
    }

    /// Rebuilds a task from persisted fields, re-running every invariant
    /// check.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] when the persisted row violates an
    /// invariant; a corrupted row is an error, never silently accepted.
    pub fn reconstitute(data: PersistedTaskData) -> Result<Self, TaskValidationError> {
        let task = Self {
            id: data.id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        };
        task.validate()?;
        Ok(task)
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns a new task with the given changes applied and `updated_at`
    /// refreshed from the clock. Unset fields carry over unchanged.
    ///
    /// Status is a plain settable field: moving a completed task back to
    /// pending through an explicit status change is allowed on purpose.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] when the resulting state violates an
    /// invariant.
    pub fn with_changes(
        &self,
        changes: TaskChanges,
        clock: &impl Clock,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id: self.id,
            title: changes.title.unwrap_or_else(|| self.title.clone()),
            description: changes
                .description
                .unwrap_or_else(|| self.description.clone()),
            due_date: changes.due_date.unwrap_or(self.due_date),
            status: changes.status.unwrap_or(self.status),
            created_at: self.created_at,
            updated_at: clock.utc(),
        };
        task.validate()?;
        Ok(task)
    }

    /// Marks the task completed.
    ///
    /// Idempotent: an already-completed task is returned unchanged, with
    /// `updated_at` untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] when the resulting state violates an
    /// invariant.
    pub fn complete(&self, clock: &impl Clock) -> Result<Self, TaskValidationError> {
        if self.status == TaskStatus::Completed {
            return Ok(self.clone());
        }
        self.with_changes(TaskChanges::new().status(TaskStatus::Completed), clock)
    }

    /// Returns true when the task has a due date strictly in the past and is
    /// not completed.
    #[must_use]
    pub fn is_overdue(&self, clock: &impl Clock) -> bool {
        self.due_date
            .is_some_and(|due| due < clock.utc() && self.status != TaskStatus::Completed)
    }

    /// Returns true when the due date lies within the next 24 hours.
    ///
    /// The window is exclusive at zero (a task due exactly now is not "due
    /// soon") and inclusive at exactly 24 hours.
    #[must_use]
    pub fn is_due_within_24_hours(&self, clock: &impl Clock) -> bool {
        self.due_date.is_some_and(|due| {
            let remaining = due - clock.utc();
            remaining > Duration::zero() && remaining <= Duration::hours(24)
        })
    }

    fn validate(&self) -> Result<(), TaskValidationError> {
        validate_title(&self.title)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        if let Some(due) = self.due_date {
            if due < self.created_at {
                return Err(TaskValidationError::DueDateBeforeCreation {
                    due,
                    created: self.created_at,
                });
            }
        }
        Ok(())
    }
}

/// Validates a task title against the domain limits.
///
/// Shared between entity construction and the use-case pre-checks so both
/// paths enforce identical rules.
///
/// # Errors
///
/// Returns [`TaskValidationError::EmptyTitle`] for blank titles and
/// [`TaskValidationError::TitleTooLong`] beyond [`TITLE_MAX_CHARS`].
pub fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    let length = title.chars().count();
    if length > TITLE_MAX_CHARS {
        return Err(TaskValidationError::TitleTooLong(length));
    }
    Ok(())
}

/// Validates a task description against the domain limits.
///
/// # Errors
///
/// Returns [`TaskValidationError::DescriptionTooLong`] beyond
/// [`DESCRIPTION_MAX_CHARS`].
pub fn validate_description(description: &str) -> Result<(), TaskValidationError> {
    let length = description.chars().count();
    if length > DESCRIPTION_MAX_CHARS {
        return Err(TaskValidationError::DescriptionTooLong(length));
    }
    Ok(())
}
