//! Timer-driven consumer that drains the notification queue into a log.
//!
//! The worker polls the queue on a fixed interval and processes at most one
//! message per tick, appending a human-readable line to a durable log file.
//! A single tick's failure is logged and never stops subsequent ticks.
//! Delivery is at-most-once: a message dequeued but not yet logged when the
//! process dies is lost, by design.

use crate::task::ports::{NotificationMessage, NotificationQueue};
use crate::task::services::NotificationService;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

/// Default interval between queue polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Default directory holding the notification log.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// File name of the append-only notification log.
pub const LOG_FILE_NAME: &str = "notifications.log";

/// Configuration for the notification worker.
#[derive(Debug, Clone)]
pub struct NotificationWorkerConfig {
    /// Interval between queue polls.
    pub poll_interval: Duration,
    /// Directory the notification log is written to.
    pub log_dir: PathBuf,
}

impl Default for NotificationWorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

struct WorkerHandle {
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

/// Timer-driven notification consumer.
///
/// A single polling loop runs per worker; ticks never overlap. `start` on a
/// running worker and `stop` on a stopped worker are no-ops, and a stopped
/// worker can be started again.
pub struct NotificationWorker<Q, C>
where
    Q: NotificationQueue + 'static,
    C: Clock + Send + Sync + 'static,
{
    notifications: NotificationService<Q, C>,
    clock: Arc<C>,
    config: NotificationWorkerConfig,
    running: Mutex<Option<WorkerHandle>>,
}

impl<Q, C> NotificationWorker<Q, C>
where
    Q: NotificationQueue + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a worker with the default configuration.
    #[must_use]
    pub fn new(notifications: NotificationService<Q, C>, clock: Arc<C>) -> Self {
        Self::with_config(notifications, clock, NotificationWorkerConfig::default())
    }

    /// Creates a worker with an explicit configuration.
    #[must_use]
    pub fn with_config(
        notifications: NotificationService<Q, C>,
        clock: Arc<C>,
        config: NotificationWorkerConfig,
    ) -> Self {
        Self {
            notifications,
            clock,
            config,
            running: Mutex::new(None),
        }
    }

    /// Returns the path of the append-only notification log.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.config.log_dir.join(LOG_FILE_NAME)
    }

    /// Starts the polling loop. Starting an already-running worker is a
    /// no-op.
    ///
    /// The log directory is created up front; a failure there is logged and
    /// the worker still starts, leaving the per-tick write to report any
    /// persistent problem.
    pub async fn start(&self) {
        let mut running = self.running.lock().await;
        if running.is_some() {
            return;
        }

        if let Err(err) = tokio::fs::create_dir_all(&self.config.log_dir).await {
            tracing::error!(
                dir = %self.config.log_dir.display(),
                error = %err,
                "failed to create notification log directory"
            );
        }

        let cancel = CancellationToken::new();
        let loop_cancel = cancel.clone();
        let notifications = self.notifications.clone();
        let clock = Arc::clone(&self.clock);
        let log_path = self.log_path();
        let poll_interval = self.config.poll_interval;
        let join = tokio::spawn(async move {
            run_loop(&notifications, &*clock, &log_path, poll_interval, &loop_cancel).await;
        });
        *running = Some(WorkerHandle { cancel, join });
        tracing::info!("notification worker started");
    }

    /// Stops the polling loop, cancelling future ticks only: an in-flight
    /// tick is allowed to finish before this returns. Stopping a worker
    /// that is not running is a no-op.
    pub async fn stop(&self) {
        let handle = self.running.lock().await.take();
        let Some(WorkerHandle { cancel, join }) = handle else {
            return;
        };
        cancel.cancel();
        if let Err(err) = join.await {
            tracing::error!(error = %err, "notification worker loop panicked");
        }
        tracing::info!("notification worker stopped");
    }
}

async fn run_loop<Q, C>(
    notifications: &NotificationService<Q, C>,
    clock: &C,
    log_path: &Path,
    poll_interval: Duration,
    cancel: &CancellationToken,
) where
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    // First poll happens one full interval after start, like the remaining
    // ones.
    let mut ticker = interval_at(Instant::now() + poll_interval, poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticker.tick() => process_one(notifications, clock, log_path).await,
        }
    }
}

/// Processes at most one queued notification: dequeue, format, append.
async fn process_one<Q, C>(
    notifications: &NotificationService<Q, C>,
    clock: &C,
    log_path: &Path,
) where
    Q: NotificationQueue,
    C: Clock + Send + Sync,
{
    let Some(message) = notifications.dequeue().await else {
        return;
    };
    let line = format_log_line(&message, clock.utc());
    if let Err(err) = append_line(log_path, &line).await {
        tracing::error!(
            path = %log_path.display(),
            error = %err,
            "failed to write notification log"
        );
        return;
    }
    tracing::info!(
        task_id = %message.task_id,
        due_date = %message.due_date,
        "notification logged"
    );
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn format_log_line(message: &NotificationMessage, at: DateTime<Utc>) -> String {
    format!(
        "[{}] Notification: Task \"{}\" (ID: {}) is due on {}\n",
        format_timestamp(at),
        message.title,
        message.task_id,
        format_timestamp(message.due_date),
    )
}

async fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{format_log_line, format_timestamp};
    use crate::task::domain::TaskId;
    use crate::task::ports::NotificationMessage;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn format_timestamp_renders_date_and_time() {
        let at = Utc.with_ymd_and_hms(2026, 1, 10, 9, 5, 3).single();
        assert_eq!(at.map(format_timestamp).as_deref(), Some("2026-01-10 09:05:03"));
    }

    #[test]
    fn format_log_line_matches_record_format() {
        let task_id = TaskId::from_uuid(Uuid::nil());
        let Some(due_date) = Utc.with_ymd_and_hms(2026, 1, 10, 18, 30, 0).single() else {
            return;
        };
        let Some(at) = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).single() else {
            return;
        };
        let message = NotificationMessage {
            task_id,
            title: "Ship report".to_owned(),
            due_date,
            enqueued_at: at,
        };

        assert_eq!(
            format_log_line(&message, at),
            format!(
                "[2026-01-10 12:00:00] Notification: Task \"Ship report\" (ID: {}) is due on 2026-01-10 18:30:00\n",
                Uuid::nil()
            )
        );
    }
}
