use super::entities::Student;
use crate::models::PaginatedResponse;
use serde::Serialize;

// 学员响应
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub student: Student,
}

// 学员列表响应
pub type StudentListResponse = PaginatedResponse<Student>;

// 重置密码响应（新密码只通过邮件发送）
#[derive(Debug, Serialize)]
pub struct PasswordResetResponse {
    pub student_id: i64,
    pub task_id: Option<String>,
}
