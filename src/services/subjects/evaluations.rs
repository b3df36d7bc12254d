use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, load_subject};
use crate::models::{
    ApiResponse,
    evaluations::{entities::EvaluationSummary, responses::SubjectEvaluationListResponse},
};
use crate::services::internal_error;

pub async fn list_evaluations(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let subject = match load_subject(&storage, subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };

    match storage.list_evaluations_by_subject(subject.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubjectEvaluationListResponse {
                subject_id: subject.id,
                summary: EvaluationSummary::from_evaluations(&items),
                items,
            },
            "Evaluation list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve evaluations", &e)),
    }
}
