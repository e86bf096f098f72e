//! Orchestration tests for the task service use-cases.

use super::{FixedClock, SteppingClock, base_instant};
use crate::task::{
    adapters::memory::{InMemoryNotificationQueue, InMemoryTaskRepository},
    domain::{TaskChanges, TaskStatus, TaskValidationError},
    ports::{NotificationQueue, NotificationQueueError, NotificationQueueResult},
    services::{CreateTaskRequest, TASK_NOTIFICATIONS_QUEUE, TaskService, TaskServiceError},
};
use async_trait::async_trait;
use chrono::Duration;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestService = TaskService<InMemoryTaskRepository, InMemoryNotificationQueue, FixedClock>;

struct TestContext {
    service: TestService,
    queue: Arc<InMemoryNotificationQueue>,
}

#[fixture]
fn ctx() -> TestContext {
    let queue = Arc::new(InMemoryNotificationQueue::new());
    let service = TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&queue),
        Arc::new(FixedClock(base_instant())),
    );
    TestContext { service, queue }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_then_get_by_id_round_trips(ctx: TestContext) {
    let due = base_instant() + Duration::hours(48);
    let created = ctx
        .service
        .create(
            CreateTaskRequest::new("Write report")
                .with_description("Quarterly figures")
                .with_due_date(due),
        )
        .await
        .expect("create should succeed");

    assert_eq!(created.status(), TaskStatus::Pending);
    assert_eq!(created.created_at(), created.updated_at());

    let fetched = ctx
        .service
        .get_by_id(&created.id().to_string())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_blank_title_before_persisting(ctx: TestContext) {
    let result = ctx.service.create(CreateTaskRequest::new("   ")).await;
    assert!(matches!(
        result,
        Err(TaskServiceError::InvalidData(TaskValidationError::EmptyTitle))
    ));

    let all = ctx
        .service
        .get_all(None)
        .await
        .expect("listing should succeed");
    assert!(all.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_overlong_title_and_description(ctx: TestContext) {
    let title_result = ctx
        .service
        .create(CreateTaskRequest::new("t".repeat(256)))
        .await;
    assert!(matches!(
        title_result,
        Err(TaskServiceError::InvalidData(
            TaskValidationError::TitleTooLong(256)
        ))
    ));

    let description_result = ctx
        .service
        .create(CreateTaskRequest::new("Task").with_description("d".repeat(2001)))
        .await;
    assert!(matches!(
        description_result,
        Err(TaskServiceError::InvalidData(
            TaskValidationError::DescriptionTooLong(2001)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_with_due_date_in_window_enqueues_exactly_one_notification(ctx: TestContext) {
    ctx.service
        .create(
            CreateTaskRequest::new("Due soon").with_due_date(base_instant() + Duration::hours(12)),
        )
        .await
        .expect("create should succeed");

    assert_eq!(ctx.queue.len(TASK_NOTIFICATIONS_QUEUE), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_outside_due_soon_window_enqueues_nothing(ctx: TestContext) {
    ctx.service
        .create(
            CreateTaskRequest::new("Due later").with_due_date(base_instant() + Duration::hours(48)),
        )
        .await
        .expect("create should succeed");
    ctx.service
        .create(CreateTaskRequest::new("No due date"))
        .await
        .expect("create should succeed");

    assert!(ctx.queue.is_empty(TASK_NOTIFICATIONS_QUEUE));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_by_id_treats_bad_identifiers_as_not_found(ctx: TestContext) {
    for id in ["", "   ", "not-a-uuid", "7f1aee2c-0000-4000-8000-000000000000"] {
        let result = ctx.service.get_by_id(id).await;
        assert!(
            matches!(result, Err(TaskServiceError::NotFound(_))),
            "expected NotFound for {id:?}"
        );
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_all_filters_by_status(ctx: TestContext) {
    let kept = ctx
        .service
        .create(CreateTaskRequest::new("Still pending"))
        .await
        .expect("create should succeed");
    let done = ctx
        .service
        .create(CreateTaskRequest::new("Finished"))
        .await
        .expect("create should succeed");
    ctx.service
        .update(
            &done.id().to_string(),
            TaskChanges::new().status(TaskStatus::Completed),
        )
        .await
        .expect("update should succeed");

    let pending = ctx
        .service
        .get_all(Some(TaskStatus::Pending))
        .await
        .expect("listing should succeed");
    assert_eq!(pending.len(), 1);
    assert!(pending.iter().all(|task| task.id() == kept.id()));

    let completed = ctx
        .service
        .get_all(Some(TaskStatus::Completed))
        .await
        .expect("listing should succeed");
    assert_eq!(completed.len(), 1);

    let all = ctx
        .service
        .get_all(None)
        .await
        .expect("listing should succeed");
    assert_eq!(all.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_validates_only_fields_being_changed() {
    let queue = Arc::new(InMemoryNotificationQueue::new());
    let clock = Arc::new(SteppingClock::new(base_instant(), Duration::minutes(1)));
    let service = TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&queue),
        clock,
    );

    let created = service
        .create(CreateTaskRequest::new("Original").with_description("Notes"))
        .await
        .expect("create should succeed");
    let id = created.id().to_string();

    let result = service
        .update(&id, TaskChanges::new().title("t".repeat(256)))
        .await;
    assert!(matches!(
        result,
        Err(TaskServiceError::InvalidData(
            TaskValidationError::TitleTooLong(256)
        ))
    ));

    // Omitting the title bypasses its validation entirely.
    let updated = service
        .update(&id, TaskChanges::new().clear_description())
        .await
        .expect("update should succeed");
    assert_eq!(updated.title(), "Original");
    assert_eq!(updated.description(), None);
    assert!(updated.updated_at() > created.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_missing_task_is_not_found(ctx: TestContext) {
    let result = ctx
        .service
        .update(
            "7f1aee2c-0000-4000-8000-000000000000",
            TaskChanges::new().title("New title"),
        )
        .await;
    assert!(matches!(result, Err(TaskServiceError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_surfaces_entity_validation_for_bad_due_date(ctx: TestContext) {
    let created = ctx
        .service
        .create(CreateTaskRequest::new("Task"))
        .await
        .expect("create should succeed");

    let result = ctx
        .service
        .update(
            &created.id().to_string(),
            TaskChanges::new().due_date(base_instant() - Duration::hours(1)),
        )
        .await;
    assert!(matches!(
        result,
        Err(TaskServiceError::Validation(
            TaskValidationError::DueDateBeforeCreation { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_into_due_soon_window_enqueues_notification(ctx: TestContext) {
    let created = ctx
        .service
        .create(CreateTaskRequest::new("Task"))
        .await
        .expect("create should succeed");
    assert!(ctx.queue.is_empty(TASK_NOTIFICATIONS_QUEUE));

    ctx.service
        .update(
            &created.id().to_string(),
            TaskChanges::new().due_date(base_instant() + Duration::hours(3)),
        )
        .await
        .expect("update should succeed");
    assert_eq!(ctx.queue.len(TASK_NOTIFICATIONS_QUEUE), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_task_and_second_delete_is_not_found(ctx: TestContext) {
    let created = ctx
        .service
        .create(CreateTaskRequest::new("Disposable"))
        .await
        .expect("create should succeed");
    let id = created.id().to_string();

    ctx.service.delete(&id).await.expect("delete should succeed");
    assert!(matches!(
        ctx.service.get_by_id(&id).await,
        Err(TaskServiceError::NotFound(_))
    ));
    assert!(matches!(
        ctx.service.delete(&id).await,
        Err(TaskServiceError::NotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_unknown_id_is_not_found(ctx: TestContext) {
    let result = ctx.service.delete("").await;
    assert!(matches!(result, Err(TaskServiceError::NotFound(_))));
}

/// Queue transport that rejects every operation.
struct FailingQueue;

#[async_trait]
impl NotificationQueue for FailingQueue {
    async fn push(&self, _queue: &str, _payload: &str) -> NotificationQueueResult<()> {
        Err(NotificationQueueError::transport(std::io::Error::other(
            "transport down",
        )))
    }

    async fn pop(&self, _queue: &str) -> NotificationQueueResult<Option<String>> {
        Err(NotificationQueueError::transport(std::io::Error::other(
            "transport down",
        )))
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn enqueue_failure_never_fails_the_originating_write() {
    let service = TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(FailingQueue),
        Arc::new(FixedClock(base_instant())),
    );

    let created = service
        .create(
            CreateTaskRequest::new("Due soon").with_due_date(base_instant() + Duration::hours(2)),
        )
        .await
        .expect("create must succeed despite the queue being down");

    let updated = service
        .update(
            &created.id().to_string(),
            TaskChanges::new().due_date(base_instant() + Duration::hours(4)),
        )
        .await
        .expect("update must succeed despite the queue being down");
    assert_eq!(updated.id(), created.id());
}
