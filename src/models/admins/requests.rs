use serde::Deserialize;

use crate::models::auth::UserRole;
use crate::models::common::PaginationQuery;
use crate::models::CommonStatus;
use crate::utils::validate::{validate_email, validate_full_name, validate_phone};

// 管理员查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct AdminListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    pub status: Option<CommonStatus>,
    pub search: Option<String>,
}

// 管理员列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AdminListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub status: Option<CommonStatus>,
    pub search: Option<String>,
}

// 管理员创建请求
#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
}

impl CreateAdminRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_email(&self.email)?;
        validate_full_name(&self.full_name)?;
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        if !self.role.is_admin() {
            return Err("Admin role must be one of super_admin, admin, viewer".to_string());
        }
        Ok(())
    }
}

// 管理员更新请求
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAdminRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<CommonStatus>,
}

impl UpdateAdminRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(full_name) = &self.full_name {
            validate_full_name(full_name)?;
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        if let Some(role) = &self.role
            && !role.is_admin()
        {
            return Err("Admin role must be one of super_admin, admin, viewer".to_string());
        }
        Ok(())
    }
}
