use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, load_student};
use crate::models::{
    ApiResponse, ErrorCode,
    audit_logs::entities::AuditAction,
    students::{requests::UpdateStudentRequest, responses::StudentResponse},
};
use crate::services::access::{current_admin, ensure_season_writable};
use crate::services::{bad_request, not_found, record_audit, storage_failure};

pub async fn update_student(
    service: &StudentService,
    student_id: i64,
    mut update_data: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = update_data.validate() {
        return Ok(bad_request(msg));
    }
    // 密码只能通过重置接口修改
    update_data.password_hash = None;

    let storage = service.get_storage(request);
    let student = match load_student(&storage, student_id).await {
        Ok(student) => student,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, student.season).await {
        return Ok(resp);
    }

    match storage.update_student(student_id, update_data).await {
        Ok(Some(student)) => {
            record_audit(
                request,
                &operator,
                AuditAction::Update,
                format!("Updated student {}", student.email),
                Some(student.season),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                StudentResponse { student },
                "Student updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(storage_failure(
            "Student update failed",
            &e,
            (
                ErrorCode::StudentAlreadyExists,
                "Email or numerical order already exists in this season",
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::services::test_support::TestEnv;

    #[actix_web::test]
    async fn test_update_respects_season_rules() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let current = env.student(1, 1, "cur@example.com").await;
        let past = env.student(2, 1, "past@example.com").await;
        let service = StudentService::new_lazy();
        let update = || UpdateStudentRequest {
            phone: Some("0901234567".to_string()),
            ..Default::default()
        };

        let resp = service
            .update_student(current.id, update(), &env.as_admin(&admin))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let resp = service
            .update_student(past.id, update(), &env.as_admin(&admin))
            .await
            .unwrap();
        assert_eq!(resp.status(), 403);
    }

    #[actix_web::test]
    async fn test_update_email_conflict() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        env.student(1, 1, "one@example.com").await;
        let two = env.student(1, 2, "two@example.com").await;
        let resp = StudentService::new_lazy()
            .update_student(
                two.id,
                UpdateStudentRequest {
                    email: Some("one@example.com".to_string()),
                    ..Default::default()
                },
                &env.as_admin(&admin),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 409);
    }
}
