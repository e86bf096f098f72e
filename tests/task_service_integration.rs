//! End-to-end task lifecycle tests over the in-memory adapters.

use chrono::{Duration, Utc};
use mockable::DefaultClock;
use std::sync::Arc;
use taskmill::task::{
    adapters::memory::{InMemoryNotificationQueue, InMemoryTaskRepository},
    domain::{TaskChanges, TaskStatus},
    services::{
        CreateTaskRequest, NotificationService, TaskResponse, TaskService, TaskServiceError,
    },
};

type Service = TaskService<InMemoryTaskRepository, InMemoryNotificationQueue, DefaultClock>;

fn service_with_queue() -> (Service, Arc<InMemoryNotificationQueue>) {
    let queue = Arc::new(InMemoryNotificationQueue::new());
    let service = TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&queue),
        Arc::new(DefaultClock),
    );
    (service, queue)
}

#[tokio::test(flavor = "multi_thread")]
async fn full_task_lifecycle_round_trips() {
    let (service, _queue) = service_with_queue();

    let groceries = service
        .create(CreateTaskRequest::new("Buy groceries").with_description("Milk and coffee"))
        .await
        .expect("create should succeed");
    let report = service
        .create(
            CreateTaskRequest::new("File expense report")
                .with_due_date(Utc::now() + Duration::days(7)),
        )
        .await
        .expect("create should succeed");

    let renamed = service
        .update(
            &groceries.id().to_string(),
            TaskChanges::new().title("Buy groceries and bread"),
        )
        .await
        .expect("update should succeed");
    assert_eq!(renamed.title(), "Buy groceries and bread");
    assert_eq!(renamed.description(), Some("Milk and coffee"));

    let completed = service
        .update(
            &report.id().to_string(),
            TaskChanges::new().status(TaskStatus::Completed),
        )
        .await
        .expect("update should succeed");
    assert_eq!(completed.status(), TaskStatus::Completed);

    let pending = service
        .get_all(Some(TaskStatus::Pending))
        .await
        .expect("listing should succeed");
    assert_eq!(pending.len(), 1);

    service
        .delete(&groceries.id().to_string())
        .await
        .expect("delete should succeed");
    assert!(matches!(
        service.get_by_id(&groceries.id().to_string()).await,
        Err(TaskServiceError::NotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn due_soon_create_feeds_the_notification_pipeline() {
    let (service, queue) = service_with_queue();

    let task = service
        .create(
            CreateTaskRequest::new("Renew certificate")
                .with_due_date(Utc::now() + Duration::hours(6)),
        )
        .await
        .expect("create should succeed");

    let notifications = NotificationService::new(queue, Arc::new(DefaultClock));
    let message = notifications
        .dequeue()
        .await
        .expect("a due-soon notification should be queued");
    assert_eq!(message.task_id, task.id());
    assert_eq!(message.title, "Renew certificate");
    assert_eq!(Some(message.due_date), task.due_date());
}

#[tokio::test(flavor = "multi_thread")]
async fn task_response_serializes_for_the_boundary() {
    let (service, _queue) = service_with_queue();

    let task = service
        .create(CreateTaskRequest::new("Serialize me"))
        .await
        .expect("create should succeed");

    let response = TaskResponse::from(&task);
    let value = serde_json::to_value(&response).expect("response should serialize");
    let object = value.as_object().expect("response should be an object");

    assert_eq!(
        object.get("id").and_then(serde_json::Value::as_str),
        Some(task.id().to_string().as_str())
    );
    assert_eq!(
        object.get("status").and_then(serde_json::Value::as_str),
        Some("pending")
    );
    assert_eq!(object.get("description"), Some(&serde_json::Value::Null));
    assert_eq!(object.get("dueDate"), Some(&serde_json::Value::Null));
    assert!(object.contains_key("createdAt"));
    assert!(object.contains_key("updatedAt"));
}
