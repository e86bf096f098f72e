//! Error types for task domain validation and parsing.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Invariant violations detected while constructing or mutating a task.
///
/// Every construction path runs the same checks, including reconstitution
/// from storage; a violation is a construction failure, never a soft
/// validation result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskValidationError {
    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The title exceeds the 255-character limit.
    #[error("task title must not exceed 255 characters (got {0})")]
    TitleTooLong(usize),

    /// The description exceeds the 2000-character limit.
    #[error("task description must not exceed 2000 characters (got {0})")]
    DescriptionTooLong(usize),

    /// The due date precedes the creation date.
    #[error("task due date {due} precedes creation date {created}")]
    DueDateBeforeCreation {
        /// The offending due date.
        due: DateTime<Utc>,
        /// The task creation date.
        created: DateTime<Utc>,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
