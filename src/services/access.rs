//! 学期写入规则与学员表单开关检查

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use super::{forbidden, internal_error};
use crate::middlewares::RequireJWT;
use crate::models::admins::entities::Admin;
use crate::models::auth::{Principal, UserRole};
use crate::models::manage_forms::entities::{FormType, ManageForm};
use crate::models::seasons::entities::Season;
use crate::models::students::entities::Student;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// viewer 只读；admin 只能写当前学期；super_admin 不受限
pub fn check_season_write(
    role: UserRole,
    target_season: i32,
    current_season: Option<i32>,
) -> Result<(), &'static str> {
    match role {
        UserRole::SuperAdmin => Ok(()),
        UserRole::Admin if current_season == Some(target_season) => Ok(()),
        UserRole::Admin => Err("Admins can only modify records of the current season"),
        UserRole::Viewer => Err("Viewer accounts are read-only"),
        UserRole::Student => Err("Students cannot modify administrative records"),
    }
}

/// 学员提交前检查表单是否开放
pub fn check_form_open(form: Option<&ManageForm>) -> Result<(), &'static str> {
    match form {
        Some(form) if form.is_open() => Ok(()),
        Some(_) => Err("This form is closed"),
        None => Err("This form has not been opened for the current season"),
    }
}

pub(crate) fn current_admin(request: &HttpRequest) -> Result<Admin, HttpResponse> {
    match RequireJWT::extract_principal(request) {
        Some(Principal::Admin(admin)) => Ok(admin),
        _ => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Administrator account required",
        ))),
    }
}

pub(crate) fn current_student(request: &HttpRequest) -> Result<Student, HttpResponse> {
    match RequireJWT::extract_principal(request) {
        Some(Principal::Student(student)) => Ok(student),
        _ => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Student account required",
        ))),
    }
}

pub(crate) async fn current_season(storage: &Arc<dyn Storage>) -> Result<Season, HttpResponse> {
    match storage.get_current_season().await {
        Ok(Some(season)) => Ok(season),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SeasonNotFound,
            "No current season is configured",
        ))),
        Err(e) => Err(internal_error("Failed to load current season", &e)),
    }
}

/// 缺省学期解析为当前学期，指定的学期必须存在
pub(crate) async fn resolve_season(
    storage: &Arc<dyn Storage>,
    season: Option<i32>,
) -> Result<i32, HttpResponse> {
    let Some(season) = season else {
        return current_season(storage).await.map(|s| s.season);
    };
    match storage.get_season(season).await {
        Ok(Some(found)) => Ok(found.season),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SeasonNotFound,
            format!("Season {season} not found"),
        ))),
        Err(e) => Err(internal_error("Failed to load season", &e)),
    }
}

/// 管理员写入某学期前的检查
pub(crate) async fn ensure_season_writable(
    storage: &Arc<dyn Storage>,
    admin: &Admin,
    target_season: i32,
) -> Result<(), HttpResponse> {
    let current = match storage.get_current_season().await {
        Ok(season) => season.map(|s| s.season),
        Err(e) => return Err(internal_error("Failed to load current season", &e)),
    };
    check_season_write(admin.role, target_season, current)
        .map_err(|msg| forbidden(ErrorCode::SeasonWriteForbidden, msg))
}

/// 无学期归属的记录（讲师）只要求写权限
pub(crate) fn ensure_writer(admin: &Admin) -> Result<(), HttpResponse> {
    if UserRole::writer_roles().contains(&&admin.role) {
        Ok(())
    } else {
        Err(forbidden(ErrorCode::Forbidden, "Viewer accounts are read-only"))
    }
}

/// 学员端写入前：表单需在当前学期开放
pub(crate) async fn ensure_form_open(
    storage: &Arc<dyn Storage>,
    form_type: FormType,
    season: i32,
) -> Result<ManageForm, HttpResponse> {
    let form = match storage.get_manage_form(season, form_type).await {
        Ok(form) => form,
        Err(e) => return Err(internal_error("Failed to load form", &e)),
    };
    check_form_open(form.as_ref()).map_err(|msg| forbidden(ErrorCode::FormClosed, msg))?;
    form.ok_or_else(|| forbidden(ErrorCode::FormClosed, "This form is closed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::manage_forms::entities::FormStatus;

    #[test]
    fn test_viewer_never_writes() {
        assert!(check_season_write(UserRole::Viewer, 3, Some(3)).is_err());
        assert!(check_season_write(UserRole::Viewer, 2, Some(3)).is_err());
        assert!(check_season_write(UserRole::Viewer, 3, None).is_err());
    }

    #[test]
    fn test_admin_writes_only_current_season() {
        assert!(check_season_write(UserRole::Admin, 3, Some(3)).is_ok());
        assert!(check_season_write(UserRole::Admin, 2, Some(3)).is_err());
        assert!(check_season_write(UserRole::Admin, 3, None).is_err());
    }

    #[test]
    fn test_super_admin_writes_anywhere() {
        for (target, current) in [(3, Some(3)), (1, Some(3)), (9, None)] {
            assert!(check_season_write(UserRole::SuperAdmin, target, current).is_ok());
        }
        assert!(check_season_write(UserRole::Student, 3, Some(3)).is_err());
    }

    #[test]
    fn test_form_must_be_open() {
        let mut form = ManageForm {
            id: 1,
            season: 3,
            form_type: FormType::SubjectRegistration,
            status: FormStatus::Closed,
            data: serde_json::Value::Null,
            updated_by: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        assert!(check_form_open(None).is_err());
        assert!(check_form_open(Some(&form)).is_err());
        form.status = FormStatus::Open;
        assert!(check_form_open(Some(&form)).is_ok());
    }
}
