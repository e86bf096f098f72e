//! Application services for task lifecycle orchestration and notifications.

mod lifecycle;
mod notification;
mod response;

pub use lifecycle::{CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult};
pub use notification::{NotificationService, TASK_NOTIFICATIONS_QUEUE};
pub use response::TaskResponse;
