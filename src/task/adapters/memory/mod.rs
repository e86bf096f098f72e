//! In-memory adapters backing the task ports for tests and local use.

mod notification;
mod task;

pub use notification::InMemoryNotificationQueue;
pub use task::InMemoryTaskRepository;
