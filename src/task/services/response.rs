//! Boundary-facing serialization of task state.

use crate::task::domain::Task;
use serde::Serialize;

/// Serialized task representation for boundary responses.
///
/// Timestamps are RFC 3339 strings; description and due date serialize as
/// `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task identifier in canonical string form.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Long-form description, when present.
    pub description: Option<String>,
    /// Due date, when present.
    pub due_date: Option<String>,
    /// Lifecycle status, `"pending"` or `"completed"`.
    pub status: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            due_date: task.due_date().map(|due| due.to_rfc3339()),
            status: task.status().as_str().to_owned(),
            created_at: task.created_at().to_rfc3339(),
            updated_at: task.updated_at().to_rfc3339(),
        }
    }
}
