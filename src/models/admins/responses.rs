use super::entities::Admin;
use crate::models::PaginatedResponse;
use serde::Serialize;

// 管理员响应
#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub admin: Admin,
}

// 管理员列表响应
pub type AdminListResponse = PaginatedResponse<Admin>;
