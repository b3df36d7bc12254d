use serde::{Deserialize, Serialize};

use crate::models::admins::entities::Admin;
use crate::models::students::entities::Student;

crate::string_enum! {
    /// 账号角色，JWT 的 role 声明同样使用这些取值
    pub enum UserRole("user role") {
        SuperAdmin => "super_admin", // 超级管理员，可写任意学期
        Admin => "admin",            // 管理员，仅可写当前学期
        Viewer => "viewer",          // 只读管理员
        Student => "student",        // 学员
    }
}

impl UserRole {
    pub fn writer_roles() -> &'static [&'static UserRole] {
        &[&Self::SuperAdmin, &Self::Admin]
    }
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::SuperAdmin, &Self::Admin, &Self::Viewer]
    }
    pub fn is_admin(&self) -> bool {
        *self != UserRole::Student
    }
}

/// 已认证的调用方
///
/// 由 `RequireJWT` 中间件写入请求扩展。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "account", rename_all = "snake_case")]
pub enum Principal {
    Admin(Admin),
    Student(Student),
}

impl Principal {
    pub fn id(&self) -> i64 {
        match self {
            Principal::Admin(admin) => admin.id,
            Principal::Student(student) => student.id,
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            Principal::Admin(admin) => admin.role,
            Principal::Student(_) => UserRole::Student,
        }
    }

    pub fn as_admin(&self) -> Option<&Admin> {
        match self {
            Principal::Admin(admin) => Some(admin),
            Principal::Student(_) => None,
        }
    }

    pub fn as_student(&self) -> Option<&Student> {
        match self {
            Principal::Student(student) => Some(student),
            Principal::Admin(_) => None,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Principal::Admin(admin) => admin.status == crate::models::CommonStatus::Active,
            Principal::Student(student) => student.status == crate::models::CommonStatus::Active,
        }
    }
}
