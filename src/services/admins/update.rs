use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::models::{
    ApiResponse, CommonStatus, ErrorCode,
    admins::{requests::UpdateAdminRequest, responses::AdminResponse},
    audit_logs::entities::AuditAction,
};
use crate::services::access::current_admin;
use crate::services::{bad_request, internal_error, not_found, record_audit, storage_failure};
use crate::utils::password::hash_password;
use crate::utils::validate::validate_password_simple;

pub async fn update_admin(
    service: &AdminService,
    admin_id: i64,
    mut update_data: UpdateAdminRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = update_data.validate() {
        return Ok(bad_request(msg));
    }

    // 不能降级或停用自己
    if admin_id == operator.id
        && (update_data.role.is_some_and(|role| role != operator.role)
            || update_data
                .status
                .is_some_and(|status| status != CommonStatus::Active))
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AdminRoleInvalid,
            "Cannot change the role or status of the current admin",
        )));
    }

    if let Some(password) = &update_data.password {
        if let Err(msg) = validate_password_simple(password) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::PasswordInvalid, msg)));
        }
        update_data.password = match hash_password(password) {
            Ok(hash) => Some(hash),
            Err(e) => return Ok(internal_error("Password hashing failed", &e)),
        };
    }

    let storage = service.get_storage(request);
    match storage.update_admin(admin_id, update_data).await {
        Ok(Some(admin)) => {
            record_audit(
                request,
                &operator,
                AuditAction::Update,
                format!("Updated admin {}", admin.email),
                None,
            );
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(AdminResponse { admin }, "Admin updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::AdminNotFound, "Admin not found")),
        Err(e) => Ok(storage_failure(
            "Admin update failed",
            &e,
            (ErrorCode::AdminAlreadyExists, "Email already exists"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::services::test_support::TestEnv;

    #[actix_web::test]
    async fn test_cannot_demote_self() {
        let env = TestEnv::new().await;
        let root = env.admin(UserRole::SuperAdmin).await;
        let resp = AdminService::new_lazy()
            .update_admin(
                root.id,
                UpdateAdminRequest {
                    role: Some(UserRole::Viewer),
                    ..Default::default()
                },
                &env.as_admin(&root),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_update_other_admin_role() {
        let env = TestEnv::new().await;
        let root = env.admin(UserRole::SuperAdmin).await;
        let staff = env.admin(UserRole::Admin).await;
        let resp = AdminService::new_lazy()
            .update_admin(
                staff.id,
                UpdateAdminRequest {
                    role: Some(UserRole::Viewer),
                    ..Default::default()
                },
                &env.as_admin(&root),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let stored = env.storage.get_admin_by_id(staff.id).await.unwrap().unwrap();
        assert_eq!(stored.role, UserRole::Viewer);
    }
}
