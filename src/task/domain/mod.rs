//! Domain model for task lifecycle management.
//!
//! The task domain models an immutable task aggregate with copy-on-mutate
//! updates, validated on every construction path, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod task;

pub use error::{ParseTaskStatusError, TaskValidationError};
pub use ids::TaskId;
pub use task::{
    DESCRIPTION_MAX_CHARS, PersistedTaskData, Task, TaskChanges, TaskStatus, TITLE_MAX_CHARS,
    validate_description, validate_title,
};
