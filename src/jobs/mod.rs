//! 进程内后台任务
//!
//! 审计日志与邮件为尽力而为的任务，不重试；报表类任务在 `task_results`
//! 中记录状态，可通过任务 ID 轮询。

pub mod mailer;
pub mod queue;
pub mod report;
pub mod runner;

pub use mailer::{EmailMessage, LogMailer, Mailer};
pub use queue::TaskQueue;
pub use runner::JobContext;

use crate::models::audit_logs::entities::NewAuditLog;

#[derive(Debug, Clone)]
pub enum Job {
    AuditLog(NewAuditLog),
    SendEmail {
        /// 有值时在 task_results 中记录结果
        task_id: Option<String>,
        message: EmailMessage,
    },
    RollCallReport {
        task_id: String,
        season: i32,
    },
}

impl Job {
    pub fn name(&self) -> &'static str {
        match self {
            Job::AuditLog(_) => "audit_log",
            Job::SendEmail { .. } => "send_email",
            Job::RollCallReport { .. } => "roll_call_report",
        }
    }

    pub fn task_id(&self) -> Option<&str> {
        match self {
            Job::AuditLog(_) => None,
            Job::SendEmail { task_id, .. } => task_id.as_deref(),
            Job::RollCallReport { task_id, .. } => Some(task_id),
        }
    }
}
