use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::{StudentService, load_student};
use crate::jobs::{EmailMessage, Job};
use crate::models::{
    ApiResponse, ErrorCode,
    audit_logs::entities::AuditAction,
    students::{requests::UpdateStudentRequest, responses::PasswordResetResponse},
};
use crate::services::access::{current_admin, ensure_season_writable};
use crate::services::{internal_error, not_found, record_audit, task_queue_from_request};
use crate::utils::password::{generate_random_password, hash_password};

pub async fn reset_password(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    // 新密码只能通过邮件送达，队列不可用时不修改密码
    let Some(queue) = task_queue_from_request(request) else {
        return Ok(
            HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                ErrorCode::TaskQueueUnavailable,
                "Task queue is not available",
            )),
        );
    };

    let storage = service.get_storage(request);
    let student = match load_student(&storage, student_id).await {
        Ok(student) => student,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, student.season).await {
        return Ok(resp);
    }

    let password = generate_random_password(10);
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Password hashing failed", &e)),
    };
    let previous_hash = student.password_hash.clone();
    let update = UpdateStudentRequest {
        password_hash: Some(password_hash),
        ..Default::default()
    };
    let student = match storage.update_student(student_id, update).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(internal_error("Password reset failed", &e)),
    };

    let message = EmailMessage::password_reset(&student, &password);
    let task_id = match queue
        .submit_tracked("send_email", |task_id| Job::SendEmail {
            task_id: Some(task_id),
            message,
        })
        .await
    {
        Ok(task) => task.task_id,
        Err(e) => {
            warn!("Password reset mail for student {} not queued: {}", student.id, e);
            // 邮件无法送达，恢复旧密码
            let restore = UpdateStudentRequest {
                password_hash: Some(previous_hash),
                ..Default::default()
            };
            if let Err(e) = storage.update_student(student_id, restore).await {
                error!("Failed to restore password of student {}: {}", student.id, e);
            }
            return Ok(
                HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                    ErrorCode::TaskQueueUnavailable,
                    "Password reset mail could not be queued, password unchanged",
                )),
            );
        }
    };

    info!("Password of student {} reset by {}", student.email, operator.email);
    record_audit(
        request,
        &operator,
        AuditAction::Update,
        format!("Reset password of student {}", student.email),
        Some(student.season),
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PasswordResetResponse {
            student_id: student.id,
            task_id: Some(task_id),
        },
        "Password reset successfully, the new password has been sent by email",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::services::test_support::{TestEnv, body_json, eventually};
    use crate::utils::password::verify_password;

    #[actix_web::test]
    async fn test_reset_password_changes_hash_and_mails_student() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let student = env.student(1, 4, "reset@example.com").await;

        let resp = StudentService::new_lazy()
            .reset_password(student.id, &env.as_admin(&admin))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body = body_json(resp).await;
        assert!(body["data"]["task_id"].is_string());

        let stored = env.storage.get_student_by_id(student.id).await.unwrap().unwrap();
        assert!(!verify_password("Password123", &stored.password_hash));

        let mailer = env.mailer.clone();
        assert!(
            eventually(|| {
                mailer
                    .sent
                    .lock()
                    .unwrap()
                    .iter()
                    .any(|m| m.to == "reset@example.com")
            })
            .await
        );
    }

    #[actix_web::test]
    async fn test_reset_password_keeps_old_password_when_mail_cannot_be_queued() {
        let mut env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let student = env.student(1, 5, "locked@example.com").await;
        env.close_queue();

        let resp = StudentService::new_lazy()
            .reset_password(student.id, &env.as_admin(&admin))
            .await
            .unwrap();
        assert_eq!(resp.status(), 503);
        let body = body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::TaskQueueUnavailable as i32);

        let stored = env.storage.get_student_by_id(student.id).await.unwrap().unwrap();
        assert!(verify_password("Password123", &stored.password_hash));
        assert!(env.mailer.sent.lock().unwrap().is_empty());
    }
}
