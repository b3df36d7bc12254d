use serde::Deserialize;

use super::entities::AbsentType;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_number;

fn validate_reason(reason: &Option<String>) -> Result<(), String> {
    if let Some(reason) = reason
        && reason.chars().count() > 1000
    {
        return Err("Reason must be at most 1000 characters".to_string());
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct AbsentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub season: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub subject_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub student_id: Option<i64>,
    pub absent_type: Option<AbsentType>,
}

#[derive(Debug, Clone, Default)]
pub struct AbsentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub season: Option<i32>,
    pub subject_id: Option<i64>,
    pub student_id: Option<i64>,
    pub absent_type: Option<AbsentType>,
}

// 学员提交或修改缺勤申请
#[derive(Debug, Deserialize)]
pub struct SubmitAbsentRequest {
    pub subject_id: i64,
    pub absent_type: AbsentType,
    pub reason: Option<String>,
}

impl SubmitAbsentRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_reason(&self.reason)
    }
}

// 管理员代学员登记缺勤
#[derive(Debug, Deserialize)]
pub struct CreateAbsentRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub absent_type: AbsentType,
    pub reason: Option<String>,
    pub note: Option<String>,
}

impl CreateAbsentRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_reason(&self.reason)
    }
}

// 缺勤新增 / 覆盖（存储层）
#[derive(Debug, Clone)]
pub struct NewAbsent {
    pub student_id: i64,
    pub subject_id: i64,
    pub season: i32,
    pub absent_type: AbsentType,
    pub reason: Option<String>,
    pub note: Option<String>,
}

// 管理员更新缺勤
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAbsentRequest {
    pub absent_type: Option<AbsentType>,
    pub reason: Option<String>,
    pub note: Option<String>,
}

impl UpdateAbsentRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_reason(&self.reason)
    }
}
