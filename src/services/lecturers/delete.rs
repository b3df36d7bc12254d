use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LecturerService;
use crate::models::{ApiResponse, ErrorCode, audit_logs::entities::AuditAction};
use crate::services::access::{current_admin, ensure_writer};
use crate::services::{internal_error, not_found, record_audit};

pub async fn delete_lecturer(
    service: &LecturerService,
    lecturer_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_writer(&operator) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);
    match storage.delete_lecturer(lecturer_id).await {
        Ok(true) => {
            record_audit(
                request,
                &operator,
                AuditAction::Delete,
                format!("Deleted lecturer {lecturer_id}"),
                None,
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Lecturer deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::LecturerNotFound, "Lecturer not found")),
        Err(e) => Ok(internal_error("Lecturer deletion failed", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommonStatus;
    use crate::models::auth::UserRole;
    use crate::models::lecturers::requests::CreateLecturerRequest;
    use crate::services::test_support::TestEnv;

    #[actix_web::test]
    async fn test_delete_lecturer_is_soft() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let lecturer = env
            .storage
            .create_lecturer(CreateLecturerRequest {
                title: None,
                holy_name: None,
                full_name: "Lê Văn D".to_string(),
                email: None,
                phone: None,
                information: None,
            })
            .await
            .unwrap();

        let resp = LecturerService::new_lazy()
            .delete_lecturer(lecturer.id, &env.as_admin(&admin))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let stored = env
            .storage
            .get_lecturer_by_id(lecturer.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, CommonStatus::Deleted);
    }
}
