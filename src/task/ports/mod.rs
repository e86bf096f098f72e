//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod notification;
pub mod repository;

pub use notification::{
    NotificationMessage, NotificationQueue, NotificationQueueError, NotificationQueueResult,
};
pub use repository::{
    CorruptedRecordError, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
};
