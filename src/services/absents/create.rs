use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AbsentService;
use crate::models::{
    ApiResponse, ErrorCode,
    absents::{
        requests::{CreateAbsentRequest, NewAbsent},
        responses::AbsentResponse,
    },
    audit_logs::entities::AuditAction,
};
use crate::services::access::{current_admin, ensure_season_writable};
use crate::services::students::load_student;
use crate::services::subjects::load_subject;
use crate::services::{bad_request, internal_error, record_audit};

pub async fn create_absent(
    service: &AbsentService,
    absent_data: CreateAbsentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };
    if let Err(msg) = absent_data.validate() {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);
    let student = match load_student(&storage, absent_data.student_id).await {
        Ok(student) => student,
        Err(resp) => return Ok(resp),
    };
    let subject = match load_subject(&storage, absent_data.subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };
    if student.season != subject.season {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Student and subject belong to different seasons",
        )));
    }
    if let Err(resp) = ensure_season_writable(&storage, &operator, subject.season).await {
        return Ok(resp);
    }

    let new_absent = NewAbsent {
        student_id: student.id,
        subject_id: subject.id,
        season: subject.season,
        absent_type: absent_data.absent_type,
        reason: absent_data.reason,
        note: absent_data.note,
    };

    match storage.upsert_absent(new_absent).await {
        Ok(absent) => {
            record_audit(
                request,
                &operator,
                AuditAction::Create,
                format!(
                    "Recorded {} absence of student {} for subject {}",
                    absent.absent_type, student.email, subject.code
                ),
                Some(absent.season),
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                AbsentResponse { absent },
                "Absent record saved successfully",
            )))
        }
        Err(e) => Ok(internal_error("Failed to save absent record", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::absents::entities::AbsentType;
    use crate::models::auth::UserRole;
    use crate::services::test_support::TestEnv;

    #[actix_web::test]
    async fn test_create_absent_requires_matching_season() {
        let env = TestEnv::new().await;
        let root = env.admin(UserRole::SuperAdmin).await;
        let student = env.student(1, 1, "ab@example.com").await;
        let same = env.subject(1, "A-1").await;
        let other = env.subject(2, "A-1").await;
        let service = AbsentService::new_lazy();
        let request = |subject_id| CreateAbsentRequest {
            student_id: student.id,
            subject_id,
            absent_type: AbsentType::NoAttend,
            reason: Some("Ốm".to_string()),
            note: None,
        };

        let resp = service.create_absent(request(other.id), &env.as_admin(&root)).await.unwrap();
        assert_eq!(resp.status(), 400);
        let resp = service.create_absent(request(same.id), &env.as_admin(&root)).await.unwrap();
        assert_eq!(resp.status(), 201);
        assert_eq!(env.storage.list_absents_by_season(1).await.unwrap().len(), 1);
    }
}
