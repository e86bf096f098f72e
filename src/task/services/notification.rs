//! Best-effort producer/consumer facade over the queue transport.

use crate::task::domain::TaskId;
use crate::task::ports::{NotificationMessage, NotificationQueue};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Queue name shared by the notification producer and the worker.
pub const TASK_NOTIFICATIONS_QUEUE: &str = "task_notifications";

/// Serializes due-soon notifications onto the queue and drains them back.
///
/// All transport and codec failures are contained here: they are logged and
/// swallowed, keeping notification delivery best-effort and fully decoupled
/// from task persistence. Neither `enqueue` nor `dequeue` ever surfaces an
/// error to its caller.
pub struct NotificationService<Q, C>
where
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    queue: Arc<Q>,
    clock: Arc<C>,
}

impl<Q, C> Clone for NotificationService<Q, C>
where
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<Q, C> NotificationService<Q, C>
where
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    /// Creates a new notification service over the given transport.
    #[must_use]
    pub const fn new(queue: Arc<Q>, clock: Arc<C>) -> Self {
        Self { queue, clock }
    }

    /// Enqueues a due-soon notification for the task.
    ///
    /// Serialization and transport failures are logged and swallowed; the
    /// originating use-case must never fail or roll back because a
    /// notification could not be queued.
    pub async fn enqueue(&self, task_id: TaskId, title: &str, due_date: DateTime<Utc>) {
        let message = NotificationMessage {
            task_id,
            title: title.to_owned(),
            due_date,
            enqueued_at: self.clock.utc(),
        };
        let payload = match serde_json::to_string(&message) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(task_id = %task_id, error = %err, "failed to serialize notification");
                return;
            }
        };
        if let Err(err) = self.queue.push(TASK_NOTIFICATIONS_QUEUE, &payload).await {
            tracing::error!(task_id = %task_id, error = %err, "failed to enqueue notification");
        }
    }

    /// Dequeues the oldest pending notification.
    ///
    /// Returns `None` when the queue is empty. Transport and
    /// deserialization failures are logged and likewise reported as `None`.
    pub async fn dequeue(&self) -> Option<NotificationMessage> {
        let payload = match self.queue.pop(TASK_NOTIFICATIONS_QUEUE).await {
            Ok(payload) => payload?,
            Err(err) => {
                tracing::error!(error = %err, "failed to dequeue notification");
                return None;
            }
        };
        match serde_json::from_str(&payload) {
            Ok(message) => Some(message),
            Err(err) => {
                tracing::error!(error = %err, "failed to deserialize notification payload");
                None
            }
        }
    }
}
