use serde::Deserialize;

use crate::models::CommonStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_number;
use crate::utils::validate::{validate_email, validate_full_name, validate_phone};

// 学员查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct StudentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub season: Option<i32>,
    pub status: Option<CommonStatus>,
    pub search: Option<String>,
}

// 学员列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub season: Option<i32>,
    pub status: Option<CommonStatus>,
    pub search: Option<String>,
}

// 学员创建请求
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    /// 缺省为当前学期
    pub season: Option<i32>,
    pub numerical_order: i32,
    pub holy_name: Option<String>,
    pub full_name: String,
    pub email: String,
    /// 缺省时生成随机初始密码并通过邮件发送
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

impl CreateStudentRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.numerical_order <= 0 {
            return Err("Numerical order must be a positive number".to_string());
        }
        validate_full_name(&self.full_name)?;
        validate_email(&self.email)?;
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        Ok(())
    }
}

// 学员新增（存储层）
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub season: i32,
    pub numerical_order: i32,
    pub holy_name: Option<String>,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

// 学员更新请求
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentRequest {
    pub numerical_order: Option<i32>,
    pub holy_name: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub status: Option<CommonStatus>,
    #[serde(skip)]
    pub password_hash: Option<String>,
}

impl UpdateStudentRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(order) = self.numerical_order
            && order <= 0
        {
            return Err("Numerical order must be a positive number".to_string());
        }
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

// 学员更新个人资料
#[derive(Debug, Deserialize)]
pub struct UpdateMyProfileRequest {
    pub holy_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl UpdateMyProfileRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        Ok(())
    }
}

// 修改密码
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}
