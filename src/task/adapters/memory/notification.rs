//! In-memory FIFO queue transport.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crate::task::ports::{NotificationQueue, NotificationQueueError, NotificationQueueResult};

/// Thread-safe in-memory queue transport.
///
/// Payloads are pushed onto the front and popped from the back of a named
/// list, honouring the head-push/tail-pop contract of the port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationQueue {
    queues: Arc<RwLock<HashMap<String, VecDeque<String>>>>,
}

impl InMemoryNotificationQueue {
    /// Creates an empty queue transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of payloads waiting on the named queue.
    #[must_use]
    pub fn len(&self, queue: &str) -> usize {
        self.queues
            .read()
            .map_or(0, |queues| queues.get(queue).map_or(0, VecDeque::len))
    }

    /// Returns true when the named queue holds no payloads.
    #[must_use]
    pub fn is_empty(&self, queue: &str) -> bool {
        self.len(queue) == 0
    }
}

#[async_trait]
impl NotificationQueue for InMemoryNotificationQueue {
    async fn push(&self, queue: &str, payload: &str) -> NotificationQueueResult<()> {
        let mut queues = self.queues.write().map_err(|err| {
            NotificationQueueError::transport(std::io::Error::other(err.to_string()))
        })?;
        queues
            .entry(queue.to_owned())
            .or_default()
            .push_front(payload.to_owned());
        Ok(())
    }

    async fn pop(&self, queue: &str) -> NotificationQueueResult<Option<String>> {
        let mut queues = self.queues.write().map_err(|err| {
            NotificationQueueError::transport(std::io::Error::other(err.to_string()))
        })?;
        Ok(queues.get_mut(queue).and_then(VecDeque::pop_back))
    }
}
