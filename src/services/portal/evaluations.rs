use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{PortalService, ensure_enrolled, student_and_season};
use crate::models::{
    ApiResponse, ErrorCode,
    evaluations::{
        requests::{NewEvaluation, SubmitEvaluationRequest},
        responses::EvaluationResponse,
    },
    manage_forms::entities::FormType,
};
use crate::services::access::ensure_form_open;
use crate::services::{forbidden, internal_error};

pub async fn submit_evaluation(
    service: &PortalService,
    evaluation_data: SubmitEvaluationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = evaluation_data.validate() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::EvaluationScoreInvalid, msg)));
    }

    let storage = service.get_storage(request);
    let (student, season) = match student_and_season(&storage, request).await {
        Ok(v) => v,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_enrolled(&student, season) {
        return Ok(resp);
    }
    let form = match ensure_form_open(&storage, FormType::SubjectEvaluation, season).await {
        Ok(form) => form,
        Err(resp) => return Ok(resp),
    };
    let subject_id = evaluation_data.subject_id;
    if !form.allows_subject(subject_id) {
        return Ok(forbidden(
            ErrorCode::FormClosed,
            "Evaluation is not open for this subject",
        ));
    }

    match storage.get_registration(student.id, subject_id).await {
        Ok(Some(registration)) if registration.season == season => {}
        Ok(_) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::SubjectNotRegistered,
                "You are not registered for this subject",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to retrieve registration", &e)),
    }

    let already_submitted = || {
        HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::EvaluationAlreadySubmitted,
            "Evaluation already submitted for this subject",
        ))
    };
    match storage.get_evaluation(student.id, subject_id).await {
        Ok(Some(_)) => return Ok(already_submitted()),
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Failed to retrieve evaluation", &e)),
    }

    let new_evaluation = NewEvaluation {
        student_id: student.id,
        subject_id,
        season,
        content_score: evaluation_data.content_score,
        lecturer_score: evaluation_data.lecturer_score,
        organization_score: evaluation_data.organization_score,
        opinion: evaluation_data.opinion,
    };
    match storage.create_evaluation(new_evaluation).await {
        Ok(evaluation) => {
            info!("Student {} evaluated subject {}", student.id, subject_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                EvaluationResponse { evaluation },
                "Evaluation submitted successfully",
            )))
        }
        // 并发提交时由唯一约束兜底
        Err(e) if e.is_unique_violation() => Ok(already_submitted()),
        Err(e) => Ok(internal_error("Failed to submit evaluation", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::manage_forms::entities::FormStatus;
    use crate::services::test_support::TestEnv;

    fn request(subject_id: i64) -> SubmitEvaluationRequest {
        SubmitEvaluationRequest {
            subject_id,
            content_score: 5,
            lecturer_score: 4,
            organization_score: 4,
            opinion: Some("Rất hữu ích".to_string()),
        }
    }

    #[actix_web::test]
    async fn test_evaluation_flow() {
        let env = TestEnv::new().await;
        let student = env.student(1, 1, "ev@example.com").await;
        let allowed = env.subject(1, "E-1").await;
        let restricted = env.subject(1, "E-2").await;
        env.storage
            .replace_student_registrations(student.id, 1, &[allowed.id, restricted.id])
            .await
            .unwrap();
        let service = PortalService::new_lazy();

        // 表单未开放
        let resp = service
            .submit_evaluation(request(allowed.id), &env.as_student(&student))
            .await
            .unwrap();
        assert_eq!(resp.status(), 403);

        env.storage
            .upsert_manage_form(
                1,
                FormType::SubjectEvaluation,
                FormStatus::Open,
                serde_json::json!({ "subject_ids": [allowed.id] }),
                None,
            )
            .await
            .unwrap();

        let resp = service
            .submit_evaluation(request(restricted.id), &env.as_student(&student))
            .await
            .unwrap();
        assert_eq!(resp.status(), 403);

        let resp = service
            .submit_evaluation(request(allowed.id), &env.as_student(&student))
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);

        let resp = service
            .submit_evaluation(request(allowed.id), &env.as_student(&student))
            .await
            .unwrap();
        assert_eq!(resp.status(), 409);
    }

    #[actix_web::test]
    async fn test_evaluation_requires_registration() {
        let env = TestEnv::new().await;
        let student = env.student(1, 1, "ev2@example.com").await;
        let subject = env.subject(1, "E-3").await;
        env.storage
            .upsert_manage_form(
                1,
                FormType::SubjectEvaluation,
                FormStatus::Open,
                serde_json::json!({}),
                None,
            )
            .await
            .unwrap();

        let resp = PortalService::new_lazy()
            .submit_evaluation(request(subject.id), &env.as_student(&student))
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
    }
}
