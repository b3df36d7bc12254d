use serde::Deserialize;

use crate::models::CommonStatus;
use crate::models::common::PaginationQuery;
use crate::utils::validate::{validate_email, validate_full_name, validate_phone};

#[derive(Debug, Deserialize)]
pub struct LecturerListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<CommonStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LecturerListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<CommonStatus>,
    pub search: Option<String>,
}

// 讲师创建请求
#[derive(Debug, Deserialize)]
pub struct CreateLecturerRequest {
    pub title: Option<String>,
    pub holy_name: Option<String>,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub information: Option<String>,
}

impl CreateLecturerRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_full_name(&self.full_name)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        Ok(())
    }
}

// 讲师更新请求
#[derive(Debug, Default, Deserialize)]
pub struct UpdateLecturerRequest {
    pub title: Option<String>,
    pub holy_name: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub information: Option<String>,
    pub status: Option<CommonStatus>,
}

impl UpdateLecturerRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(full_name) = &self.full_name {
            validate_full_name(full_name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        Ok(())
    }
}
