use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Notify, Semaphore, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::runner::{JobContext, run_job};
use super::Job;
use crate::config::AppConfig;
use crate::errors::{Result, TrainHubError};
use crate::models::tasks::entities::TaskResult;

/// 已入队但尚未执行完的任务计数，归零时唤醒等待者
#[derive(Default)]
struct Pending {
    count: AtomicUsize,
    idle: Notify,
}

impl Pending {
    fn add(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    fn done(&self) {
        if self.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.idle.notify_waiters();
        }
    }

    fn is_idle(&self) -> bool {
        self.count.load(Ordering::SeqCst) == 0
    }
}

/// 有界任务队列
///
/// 单个分发循环从通道取任务，用信号量限制并发执行数。
#[derive(Clone)]
pub struct TaskQueue {
    sender: mpsc::Sender<Job>,
    pending: Arc<Pending>,
    ctx: JobContext,
}

impl TaskQueue {
    pub fn start(ctx: JobContext, capacity: usize, max_concurrency: usize) -> (Self, JoinHandle<()>) {
        let max_concurrency = max_concurrency.clamp(1, Semaphore::MAX_PERMITS);
        let (sender, mut receiver) = mpsc::channel::<Job>(capacity.max(1));
        let permits = Arc::new(Semaphore::new(max_concurrency));
        let pending = Arc::new(Pending::default());

        let dispatcher_pending = pending.clone();
        let dispatcher_ctx = ctx.clone();
        let handle = tokio::spawn(async move {
            while let Some(job) = receiver.recv().await {
                let Ok(permit) = permits.clone().acquire_owned().await else {
                    break;
                };
                let ctx = dispatcher_ctx.clone();
                let pending = dispatcher_pending.clone();
                tokio::spawn(async move {
                    run_job(&ctx, job).await;
                    drop(permit);
                    pending.done();
                });
            }
            debug!("Task queue dispatcher stopped");
        });

        (
            Self {
                sender,
                pending,
                ctx,
            },
            handle,
        )
    }

    /// 接收端已关闭的队列，所有投递都会失败
    #[cfg(test)]
    pub(crate) fn closed(ctx: JobContext) -> Self {
        let (sender, _) = mpsc::channel::<Job>(1);
        Self {
            sender,
            pending: Arc::new(Pending::default()),
            ctx,
        }
    }

    pub fn from_config(ctx: JobContext) -> (Self, JoinHandle<()>) {
        let config = &AppConfig::get().tasks;
        Self::start(ctx, config.capacity, config.max_concurrency)
    }

    /// 投递任务，队列已满或已关闭时返回错误
    pub fn enqueue(&self, job: Job) -> Result<()> {
        let name = job.name();
        self.pending.add();
        self.sender.try_send(job).map_err(|e| {
            self.pending.done();
            warn!("Failed to enqueue job {}: {}", name, e);
            TrainHubError::task_queue(format!("Failed to enqueue job {name}: {e}"))
        })
    }

    /// 投递需要跟踪结果的任务：先写入 pending 记录，再入队
    pub async fn submit_tracked<F>(&self, name: &str, make_job: F) -> Result<TaskResult>
    where
        F: FnOnce(String) -> Job,
    {
        let task_id = uuid::Uuid::new_v4().to_string();
        let task = self.ctx.storage.create_task_result(&task_id, name).await?;

        if let Err(e) = self.enqueue(make_job(task_id.clone())) {
            let _ = self
                .ctx
                .storage
                .update_task_result(
                    &task_id,
                    crate::models::tasks::entities::TaskStatus::Failure,
                    None,
                    Some(e.to_string()),
                )
                .await;
            return Err(e);
        }
        Ok(task)
    }

    /// 等待已入队与执行中的任务全部结束，超时返回 false
    pub async fn wait_idle(&self, timeout: Duration) -> bool {
        let drained = async {
            loop {
                // 先注册再检查，避免错过归零通知
                let notified = self.pending.idle.notified();
                if self.pending.is_idle() {
                    return;
                }
                notified.await;
            }
        };
        tokio::time::timeout(timeout, drained).await.is_ok()
    }

    /// 已入队或执行中的任务数
    pub fn pending_jobs(&self) -> usize {
        self.pending.count.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::EmailMessage;
    use crate::jobs::mailer::tests::RecordingMailer;
    use crate::models::tasks::entities::TaskStatus;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    fn message(to: &str) -> EmailMessage {
        EmailMessage {
            to: to.to_string(),
            subject: "s".to_string(),
            body: "b".to_string(),
        }
    }

    async fn queue(capacity: usize) -> (TaskQueue, Arc<RecordingMailer>) {
        queue_with(capacity, RecordingMailer::default()).await
    }

    async fn queue_with(capacity: usize, mailer: RecordingMailer) -> (TaskQueue, Arc<RecordingMailer>) {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await.unwrap());
        let mailer = Arc::new(mailer);
        let (queue, _) = TaskQueue::start(
            JobContext {
                storage,
                mailer: mailer.clone(),
            },
            capacity,
            2,
        );
        (queue, mailer)
    }

    #[tokio::test]
    async fn test_tracked_job_runs_to_completion() {
        let (queue, mailer) = queue(8).await;
        let task = queue
            .submit_tracked("send_email", |task_id| Job::SendEmail {
                task_id: Some(task_id),
                message: EmailMessage {
                    to: "an@example.com".to_string(),
                    subject: "s".to_string(),
                    body: "b".to_string(),
                },
            })
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Pending);

        let mut status = TaskStatus::Pending;
        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            status = queue
                .ctx
                .storage
                .get_task_result(&task.task_id)
                .await
                .unwrap()
                .unwrap()
                .status;
            if status.is_finished() {
                break;
            }
        }
        assert_eq!(status, TaskStatus::Success);
        assert!(queue.wait_idle(Duration::from_secs(1)).await);
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_wait_idle_drains_queued_jobs() {
        let (queue, mailer) = queue_with(
            16,
            RecordingMailer {
                delay_ms: 50,
                ..Default::default()
            },
        )
        .await;
        // 并发为 2，多数任务在等待时仍在通道中
        for i in 0..6 {
            queue
                .enqueue(Job::SendEmail {
                    task_id: None,
                    message: message(&format!("s{i}@example.com")),
                })
                .unwrap();
        }
        assert!(queue.pending_jobs() > 0);

        assert!(queue.wait_idle(Duration::from_secs(5)).await);
        assert_eq!(queue.pending_jobs(), 0);
        assert_eq!(mailer.sent.lock().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_wait_idle_times_out_while_jobs_run() {
        let (queue, _mailer) = queue_with(
            4,
            RecordingMailer {
                delay_ms: 500,
                ..Default::default()
            },
        )
        .await;
        queue
            .enqueue(Job::SendEmail {
                task_id: None,
                message: message("slow@example.com"),
            })
            .unwrap();

        assert!(!queue.wait_idle(Duration::from_millis(20)).await);
        assert!(queue.wait_idle(Duration::from_secs(5)).await);
    }

    #[tokio::test]
    async fn test_closed_queue_rejects_and_stays_idle() {
        let (open, _mailer) = queue(1).await;
        let queue = TaskQueue::closed(open.ctx.clone());
        assert!(
            queue
                .enqueue(Job::SendEmail {
                    task_id: None,
                    message: message("x@example.com"),
                })
                .is_err()
        );
        assert_eq!(queue.pending_jobs(), 0);
        assert!(queue.wait_idle(Duration::from_millis(10)).await);

        let result = queue
            .submit_tracked("send_email", |task_id| Job::SendEmail {
                task_id: Some(task_id),
                message: message("x@example.com"),
            })
            .await;
        assert!(result.is_err());
    }
}
