//! Queue transport port and wire payload for due-soon notifications.

use crate::task::domain::TaskId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification queue operations.
pub type NotificationQueueResult<T> = Result<T, NotificationQueueError>;

/// Wire payload for one due-soon notification.
///
/// The payload has no identity beyond its position in the queue; it lives
/// only on the queue and in the worker's log line, and is never persisted
/// elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMessage {
    /// Identifier of the task the notification refers to.
    pub task_id: TaskId,
    /// Task title at enqueue time.
    pub title: String,
    /// Due date the notification announces.
    pub due_date: DateTime<Utc>,
    /// Instant the producer enqueued the message.
    pub enqueued_at: DateTime<Utc>,
}

/// Push/pop primitive over a named FIFO list.
///
/// `push` adds to the head and `pop` removes from the tail, so the oldest
/// payload is always dequeued first. Implementations must make both
/// operations atomic; the consumer relies on strict FIFO ordering within a
/// queue.
#[async_trait]
pub trait NotificationQueue: Send + Sync {
    /// Pushes a serialized payload onto the head of the named queue.
    async fn push(&self, queue: &str, payload: &str) -> NotificationQueueResult<()>;

    /// Pops the oldest payload from the named queue.
    ///
    /// Returns `None` when the queue is empty.
    async fn pop(&self, queue: &str) -> NotificationQueueResult<Option<String>>;
}

/// Errors returned by queue transport implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationQueueError {
    /// Transport-level failure.
    #[error("queue transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationQueueError {
    /// Wraps a transport error.
    #[must_use]
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
