use serde::Deserialize;

use super::entities::GeneralTaskType;
use crate::models::CommonStatus;
use crate::models::auth::UserRole;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_number;

fn validate_period(
    start_at: chrono::DateTime<chrono::Utc>,
    end_at: chrono::DateTime<chrono::Utc>,
) -> Result<(), String> {
    if start_at > end_at {
        return Err("start_at must not be later than end_at".to_string());
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct GeneralTaskListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub season: Option<i32>,
    pub role: Option<UserRole>,
    pub task_type: Option<GeneralTaskType>,
    pub status: Option<CommonStatus>,
}

#[derive(Debug, Clone, Default)]
pub struct GeneralTaskListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub season: Option<i32>,
    pub role: Option<UserRole>,
    pub task_type: Option<GeneralTaskType>,
    pub status: Option<CommonStatus>,
}

// 工作任务创建请求
#[derive(Debug, Deserialize)]
pub struct CreateGeneralTaskRequest {
    pub season: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub role: UserRole,
    pub task_type: GeneralTaskType,
    pub start_at: chrono::DateTime<chrono::Utc>,
    pub end_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub document_ids: Vec<i64>,
}

impl CreateGeneralTaskRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Task title is required".to_string());
        }
        if !self.role.is_admin() {
            return Err("Task role must be an admin role".to_string());
        }
        validate_period(self.start_at, self.end_at)
    }
}

// 工作任务新增（存储层）
#[derive(Debug, Clone)]
pub struct NewGeneralTask {
    pub season: i32,
    pub title: String,
    pub description: Option<String>,
    pub role: UserRole,
    pub task_type: GeneralTaskType,
    pub start_at: chrono::DateTime<chrono::Utc>,
    pub end_at: chrono::DateTime<chrono::Utc>,
    pub document_ids: Vec<i64>,
    pub created_by: i64,
}

// 工作任务更新请求
#[derive(Debug, Default, Deserialize)]
pub struct UpdateGeneralTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub role: Option<UserRole>,
    pub task_type: Option<GeneralTaskType>,
    pub start_at: Option<chrono::DateTime<chrono::Utc>>,
    pub end_at: Option<chrono::DateTime<chrono::Utc>>,
    pub document_ids: Option<Vec<i64>>,
    pub status: Option<CommonStatus>,
}

impl UpdateGeneralTaskRequest {
    /// 与现有记录合并后校验起止时间
    pub fn validate(
        &self,
        current_start: chrono::DateTime<chrono::Utc>,
        current_end: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), String> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("Task title is required".to_string());
        }
        if let Some(role) = &self.role
            && !role.is_admin()
        {
            return Err("Task role must be an admin role".to_string());
        }
        validate_period(
            self.start_at.unwrap_or(current_start),
            self.end_at.unwrap_or(current_end),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_create_rejects_inverted_period() {
        let now = Utc::now();
        let mut req = CreateGeneralTaskRequest {
            season: None,
            title: "Chuẩn bị tài liệu".to_string(),
            description: None,
            role: UserRole::Admin,
            task_type: GeneralTaskType::Common,
            start_at: now,
            end_at: now,
            document_ids: vec![],
        };
        assert!(req.validate().is_ok());
        req.end_at = now - Duration::days(1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_merges_with_current_period() {
        let now = Utc::now();
        let req = UpdateGeneralTaskRequest {
            start_at: Some(now + Duration::days(10)),
            ..Default::default()
        };
        assert!(req.validate(now, now + Duration::days(5)).is_err());
        assert!(req.validate(now, now + Duration::days(20)).is_ok());
    }

    #[test]
    fn test_student_role_is_rejected() {
        let req = UpdateGeneralTaskRequest {
            role: Some(UserRole::Student),
            ..Default::default()
        };
        let now = Utc::now();
        assert!(req.validate(now, now).is_err());
    }
}
