use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RollCallService;
use super::compute::subject_detail as compute_detail;
use crate::models::ApiResponse;
use crate::services::internal_error;
use crate::services::subjects::load_subject;

pub async fn subject_detail(
    service: &RollCallService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let subject = match load_subject(&storage, subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };

    let loaded = async {
        Ok::<_, crate::errors::TrainHubError>((
            storage.list_students_by_season(subject.season).await?,
            storage.list_registrations_by_subject(subject.id).await?,
            storage.list_evaluations_by_subject(subject.id).await?,
            storage.list_absents_by_season(subject.season).await?,
        ))
    }
    .await;
    let (students, registrations, evaluations, absents) = match loaded {
        Ok(data) => data,
        Err(e) => return Ok(internal_error("Failed to load roll call data", &e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        compute_detail(&subject, &students, &registrations, &evaluations, &absents),
        "Subject roll call retrieved successfully",
    )))
}
