use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::models::{ApiResponse, ErrorCode, audit_logs::entities::AuditAction};
use crate::services::access::current_admin;
use crate::services::{internal_error, not_found, record_audit};

pub async fn delete_admin(
    service: &AdminService,
    admin_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    // 禁止删除当前管理员
    if admin_id == operator.id {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CanNotDeleteCurrentAdmin,
            "Cannot delete current admin",
        )));
    }

    let storage = service.get_storage(request);
    match storage.delete_admin(admin_id).await {
        Ok(true) => {
            record_audit(
                request,
                &operator,
                AuditAction::Delete,
                format!("Deleted admin {admin_id}"),
                None,
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Admin deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::AdminNotFound, "Admin not found")),
        Err(e) => Ok(internal_error("Admin deletion failed", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommonStatus;
    use crate::models::auth::UserRole;
    use crate::services::test_support::TestEnv;

    #[actix_web::test]
    async fn test_delete_admin_is_soft_and_not_self() {
        let env = TestEnv::new().await;
        let root = env.admin(UserRole::SuperAdmin).await;
        let staff = env.admin(UserRole::Viewer).await;
        let service = AdminService::new_lazy();

        let resp = service.delete_admin(root.id, &env.as_admin(&root)).await.unwrap();
        assert_eq!(resp.status(), 400);

        let resp = service.delete_admin(staff.id, &env.as_admin(&root)).await.unwrap();
        assert_eq!(resp.status(), 200);
        let stored = env.storage.get_admin_by_id(staff.id).await.unwrap().unwrap();
        assert_eq!(stored.status, CommonStatus::Deleted);

        let resp = service.delete_admin(9999, &env.as_admin(&root)).await.unwrap();
        assert_eq!(resp.status(), 404);
    }
}
