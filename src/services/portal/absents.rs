use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PortalService, ensure_enrolled, student_and_season};
use crate::models::{
    ApiResponse, ErrorCode,
    absents::{
        requests::{NewAbsent, SubmitAbsentRequest},
        responses::AbsentResponse,
    },
    manage_forms::entities::FormType,
};
use crate::services::access::ensure_form_open;
use crate::services::{bad_request, internal_error};

/// 提交或修改本人缺勤申请，管理员备注保留
pub async fn submit_absent(
    service: &PortalService,
    absent_data: SubmitAbsentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = absent_data.validate() {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);
    let (student, season) = match student_and_season(&storage, request).await {
        Ok(v) => v,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_enrolled(&student, season) {
        return Ok(resp);
    }
    if let Err(resp) = ensure_form_open(&storage, FormType::SubjectAbsent, season).await {
        return Ok(resp);
    }

    match storage
        .get_registration(student.id, absent_data.subject_id)
        .await
    {
        Ok(Some(registration)) if registration.season == season => {}
        Ok(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotRegistered,
                "You are not registered for this subject",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to retrieve registration", &e)),
    }

    let absent = NewAbsent {
        student_id: student.id,
        subject_id: absent_data.subject_id,
        season,
        absent_type: absent_data.absent_type,
        reason: absent_data.reason,
        note: None,
    };
    match storage.upsert_absent(absent).await {
        Ok(absent) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AbsentResponse { absent },
            "Absent request saved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to save absent request", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::absents::entities::AbsentType;
    use crate::models::manage_forms::entities::FormStatus;
    use crate::services::test_support::TestEnv;

    #[actix_web::test]
    async fn test_resubmission_overwrites_type() {
        let env = TestEnv::new().await;
        let student = env.student(1, 1, "abs@example.com").await;
        let subject = env.subject(1, "AB-1").await;
        env.storage
            .replace_student_registrations(student.id, 1, &[subject.id])
            .await
            .unwrap();
        env.storage
            .upsert_manage_form(1, FormType::SubjectAbsent, FormStatus::Open, serde_json::json!({}), None)
            .await
            .unwrap();
        let service = PortalService::new_lazy();

        for absent_type in [AbsentType::NoAttend, AbsentType::NoEvaluation] {
            let resp = service
                .submit_absent(
                    SubmitAbsentRequest {
                        subject_id: subject.id,
                        absent_type,
                        reason: Some("Bận công tác".to_string()),
                    },
                    &env.as_student(&student),
                )
                .await
                .unwrap();
            assert_eq!(resp.status(), 200);
        }

        let absents = env.storage.list_absents_by_season(1).await.unwrap();
        assert_eq!(absents.len(), 1);
        assert_eq!(absents[0].absent_type, AbsentType::NoEvaluation);
    }
}
