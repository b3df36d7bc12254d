use serde::{Deserialize, Serialize};

crate::string_enum! {
    /// 后台任务状态
    pub enum TaskStatus("task status") {
        Pending => "pending",
        Started => "started",
        Success => "success",
        Failure => "failure",
    }
}

impl TaskStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, TaskStatus::Success | TaskStatus::Failure)
    }
}

// 后台任务结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    pub id: i64,
    pub task_id: String,
    pub name: String,
    pub status: TaskStatus,
    pub result: Option<serde_json::Value>,
    pub error: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub done_at: Option<chrono::DateTime<chrono::Utc>>,
}
