use serde::{Deserialize, Serialize};

use crate::models::CommonStatus;
use crate::models::auth::UserRole;

crate::string_enum! {
    /// 工作任务类型
    pub enum GeneralTaskType("general task type") {
        Common => "common", // 本学期一次性任务
        Annual => "annual", // 每学期重复的任务
    }
}

// 教务人员工作任务
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralTask {
    pub id: i64,
    pub season: i32,
    pub title: String,
    pub description: Option<String>,
    /// 负责该任务的角色
    pub role: UserRole,
    pub task_type: GeneralTaskType,
    pub start_at: chrono::DateTime<chrono::Utc>,
    pub end_at: chrono::DateTime<chrono::Utc>,
    pub document_ids: Vec<i64>,
    pub created_by: i64,
    pub status: CommonStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
