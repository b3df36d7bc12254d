use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, load_student};
use crate::models::{ApiResponse, ErrorCode, audit_logs::entities::AuditAction};
use crate::services::access::{current_admin, ensure_season_writable};
use crate::services::{internal_error, not_found, record_audit};

pub async fn delete_student(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let student = match load_student(&storage, student_id).await {
        Ok(student) => student,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, student.season).await {
        return Ok(resp);
    }

    match storage.delete_student(student_id).await {
        Ok(true) => {
            record_audit(
                request,
                &operator,
                AuditAction::Delete,
                format!("Deleted student {}", student.email),
                Some(student.season),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(internal_error("Student deletion failed", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::services::test_support::TestEnv;

    #[actix_web::test]
    async fn test_delete_twice_returns_not_found() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let student = env.student(1, 1, "gone@example.com").await;
        let service = StudentService::new_lazy();

        let resp = service.delete_student(student.id, &env.as_admin(&admin)).await.unwrap();
        assert_eq!(resp.status(), 200);
        let resp = service.delete_student(student.id, &env.as_admin(&admin)).await.unwrap();
        assert_eq!(resp.status(), 404);
        assert!(env.storage.list_students_by_season(1).await.unwrap().is_empty());
    }
}
