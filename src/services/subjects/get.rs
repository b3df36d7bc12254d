use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, load_subject};
use crate::models::{
    ApiResponse,
    subjects::{entities::SubjectDetail, responses::SubjectDetailResponse},
};
use crate::services::internal_error;

pub async fn get_subject(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let subject = match load_subject(&storage, subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };

    let lecturer = match subject.lecturer_id {
        Some(lecturer_id) => match storage.get_lecturer_by_id(lecturer_id).await {
            Ok(lecturer) => lecturer,
            Err(e) => return Ok(internal_error("Failed to retrieve lecturer", &e)),
        },
        None => None,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubjectDetailResponse {
            subject: SubjectDetail { subject, lecturer },
        },
        "Subject information retrieved successfully",
    )))
}
