use std::sync::Arc;
use tracing::{debug, error, warn};

use super::{Job, Mailer, report::render_roll_call_csv};
use crate::errors::Result;
use crate::models::tasks::entities::TaskStatus;
use crate::services::roll_call::compute::load_season_result;
use crate::storage::Storage;

/// 任务执行所需的依赖
#[derive(Clone)]
pub struct JobContext {
    pub storage: Arc<dyn Storage>,
    pub mailer: Arc<dyn Mailer>,
}

/// 执行单个任务，失败只记录不外抛
pub async fn run_job(ctx: &JobContext, job: Job) {
    let name = job.name();
    let task_id = job.task_id().map(str::to_string);

    if let Some(task_id) = &task_id {
        mark(ctx, task_id, TaskStatus::Started, None, None).await;
    }

    let outcome = execute(ctx, job).await;

    match (&task_id, outcome) {
        (Some(task_id), Ok(result)) => {
            mark(ctx, task_id, TaskStatus::Success, result, None).await;
        }
        (Some(task_id), Err(e)) => {
            warn!("Task {} ({}) failed: {}", task_id, name, e);
            mark(ctx, task_id, TaskStatus::Failure, None, Some(e.to_string())).await;
        }
        (None, Ok(_)) => debug!("Job {} completed", name),
        (None, Err(e)) => warn!("Job {} failed: {}", name, e),
    }
}

async fn execute(ctx: &JobContext, job: Job) -> Result<Option<serde_json::Value>> {
    match job {
        Job::AuditLog(log) => {
            ctx.storage.create_audit_log(log).await?;
            Ok(None)
        }
        Job::SendEmail { message, .. } => {
            ctx.mailer.send(&message).await?;
            Ok(Some(serde_json::json!({ "to": message.to })))
        }
        Job::RollCallReport { season, .. } => {
            let result = load_season_result(ctx.storage.as_ref(), season).await?;
            let csv = render_roll_call_csv(&result)?;
            Ok(Some(serde_json::json!({
                "season": season,
                "students": result.students.len(),
                "subjects": result.subjects.len(),
                "filename": format!("roll_call_season_{season}.csv"),
                "csv": csv,
            })))
        }
    }
}

async fn mark(
    ctx: &JobContext,
    task_id: &str,
    status: TaskStatus,
    result: Option<serde_json::Value>,
    err: Option<String>,
) {
    if let Err(e) = ctx
        .storage
        .update_task_result(task_id, status, result, err)
        .await
    {
        error!("Failed to update task result {}: {}", task_id, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::EmailMessage;
    use crate::jobs::mailer::tests::RecordingMailer;
    use crate::models::audit_logs::entities::{AuditAction, NewAuditLog};
    use crate::models::audit_logs::requests::AuditLogListQuery;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn context(fail_mail: bool) -> (JobContext, Arc<RecordingMailer>) {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await.unwrap());
        let mailer = Arc::new(RecordingMailer {
            fail: fail_mail,
            ..Default::default()
        });
        (
            JobContext {
                storage,
                mailer: mailer.clone(),
            },
            mailer,
        )
    }

    fn message() -> EmailMessage {
        EmailMessage {
            to: "an@example.com".to_string(),
            subject: "hello".to_string(),
            body: "body".to_string(),
        }
    }

    #[tokio::test]
    async fn test_audit_log_job_writes_log() {
        let (ctx, _) = context(false).await;
        run_job(
            &ctx,
            Job::AuditLog(NewAuditLog {
                admin_id: 1,
                action: AuditAction::Create,
                endpoint: "/api/v1/admin/students".to_string(),
                description: Some("Created student 7".to_string()),
                season: Some(1),
                ip_address: None,
            }),
        )
        .await;

        let logs = ctx
            .storage
            .list_audit_logs_with_pagination(AuditLogListQuery::default())
            .await
            .unwrap();
        assert_eq!(logs.pagination.total, 1);
        assert_eq!(logs.items[0].action, AuditAction::Create);
    }

    #[tokio::test]
    async fn test_tracked_email_records_success_and_failure() {
        let (ctx, mailer) = context(false).await;
        ctx.storage.create_task_result("t-ok", "send_email").await.unwrap();
        run_job(
            &ctx,
            Job::SendEmail {
                task_id: Some("t-ok".to_string()),
                message: message(),
            },
        )
        .await;
        let task = ctx.storage.get_task_result("t-ok").await.unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::Success);
        assert!(task.done_at.is_some());
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);

        let (ctx, _) = context(true).await;
        ctx.storage.create_task_result("t-bad", "send_email").await.unwrap();
        run_job(
            &ctx,
            Job::SendEmail {
                task_id: Some("t-bad".to_string()),
                message: message(),
            },
        )
        .await;
        let task = ctx.storage.get_task_result("t-bad").await.unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::Failure);
        assert!(task.error.unwrap().contains("smtp unavailable"));
    }

    #[tokio::test]
    async fn test_roll_call_report_stores_csv() {
        let (ctx, _) = context(false).await;
        ctx.storage
            .create_task_result("t-report", "roll_call_report")
            .await
            .unwrap();
        run_job(
            &ctx,
            Job::RollCallReport {
                task_id: "t-report".to_string(),
                season: 1,
            },
        )
        .await;

        let task = ctx.storage.get_task_result("t-report").await.unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::Success);
        let result = task.result.unwrap();
        assert_eq!(result["season"], 1);
        assert!(
            result["csv"]
                .as_str()
                .unwrap()
                .starts_with("numerical_order,")
        );
    }
}
