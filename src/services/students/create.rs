use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::StudentService;
use crate::jobs::{EmailMessage, Job};
use crate::models::{
    ApiResponse, ErrorCode,
    audit_logs::entities::AuditAction,
    students::{
        requests::{CreateStudentRequest, NewStudent},
        responses::StudentResponse,
    },
};
use crate::services::access::{current_admin, ensure_season_writable, resolve_season};
use crate::services::{
    bad_request, internal_error, record_audit, storage_failure, task_queue_from_request,
};
use crate::utils::password::{generate_random_password, hash_password};
use crate::utils::validate::validate_password_simple;

pub async fn create_student(
    service: &StudentService,
    student_data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = student_data.validate() {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);
    let season = match resolve_season(&storage, student_data.season).await {
        Ok(season) => season,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, season).await {
        return Ok(resp);
    }

    // 未提供密码时生成随机初始密码
    let password = match student_data.password {
        Some(password) => {
            if let Err(msg) = validate_password_simple(&password) {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::PasswordInvalid, msg)));
            }
            password
        }
        None => generate_random_password(10),
    };
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Password hashing failed", &e)),
    };

    let new_student = NewStudent {
        season,
        numerical_order: student_data.numerical_order,
        holy_name: student_data.holy_name,
        full_name: student_data.full_name.trim().to_string(),
        email: student_data.email,
        password_hash,
        phone: student_data.phone,
        address: student_data.address,
        note: student_data.note,
    };

    let student = match storage.create_student(new_student).await {
        Ok(student) => student,
        Err(e) => {
            return Ok(storage_failure(
                "Student creation failed",
                &e,
                (
                    ErrorCode::StudentAlreadyExists,
                    "Email or numerical order already exists in this season",
                ),
            ));
        }
    };

    info!(
        "Student {} (season {}, #{}) created",
        student.email, student.season, student.numerical_order
    );
    record_audit(
        request,
        &operator,
        AuditAction::Create,
        format!("Created student {}", student.email),
        Some(student.season),
    );

    match task_queue_from_request(request) {
        Some(queue) => {
            let job = Job::SendEmail {
                task_id: None,
                message: EmailMessage::welcome(&student, &password),
            };
            if let Err(e) = queue.enqueue(job) {
                warn!(
                    "Welcome email for student {} ({}) not queued: {}; reset the password to resend",
                    student.id, student.email, e
                );
            }
        }
        None => warn!(
            "Task queue unavailable, welcome email for student {} ({}) skipped",
            student.id, student.email
        ),
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(
        StudentResponse { student },
        "Student created successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::services::test_support::{TestEnv, body_json, eventually};

    fn request(season: Option<i32>, order: i32, email: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            season,
            numerical_order: order,
            holy_name: Some("Maria".to_string()),
            full_name: "Trần Thị B".to_string(),
            email: email.to_string(),
            password: None,
            phone: None,
            address: None,
            note: None,
        }
    }

    #[actix_web::test]
    async fn test_create_student_defaults_to_current_season_and_sends_welcome() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let service = StudentService::new_lazy();

        let resp = service
            .create_student(request(None, 7, "b@example.com"), &env.as_admin(&admin))
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["student"]["season"], 1);

        let mailer = env.mailer.clone();
        assert!(
            eventually(|| {
                mailer
                    .sent
                    .lock()
                    .unwrap()
                    .iter()
                    .any(|m| m.to == "b@example.com")
            })
            .await
        );
    }

    #[actix_web::test]
    async fn test_create_student_succeeds_when_welcome_mail_cannot_be_queued() {
        let mut env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        env.close_queue();

        let resp = StudentService::new_lazy()
            .create_student(request(None, 8, "quiet@example.com"), &env.as_admin(&admin))
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        let body = body_json(resp).await;
        let id = body["data"]["student"]["id"].as_i64().unwrap();

        assert!(env.storage.get_student_by_id(id).await.unwrap().is_some());
        assert!(env.mailer.sent.lock().unwrap().is_empty());
        assert_eq!(env.queue.pending_jobs(), 0);
    }

    #[actix_web::test]
    async fn test_admin_cannot_create_in_past_season() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let viewer = env.admin(UserRole::Viewer).await;
        let root = env.admin(UserRole::SuperAdmin).await;
        let service = StudentService::new_lazy();

        let resp = service
            .create_student(request(Some(2), 1, "c@example.com"), &env.as_admin(&admin))
            .await
            .unwrap();
        assert_eq!(resp.status(), 403);

        let resp = service
            .create_student(request(None, 1, "c@example.com"), &env.as_admin(&viewer))
            .await
            .unwrap();
        assert_eq!(resp.status(), 403);

        let resp = service
            .create_student(request(Some(2), 1, "c@example.com"), &env.as_admin(&root))
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    #[actix_web::test]
    async fn test_duplicate_numerical_order_conflicts() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let service = StudentService::new_lazy();

        let resp = service
            .create_student(request(None, 3, "d@example.com"), &env.as_admin(&admin))
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        let resp = service
            .create_student(request(None, 3, "e@example.com"), &env.as_admin(&admin))
            .await
            .unwrap();
        assert_eq!(resp.status(), 409);
    }
}
