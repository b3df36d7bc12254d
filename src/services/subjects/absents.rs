use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, load_subject};
use crate::models::{ApiResponse, absents::requests::AbsentListQuery, common::PaginationQuery};
use crate::services::internal_error;

pub async fn list_absents(
    service: &SubjectService,
    subject_id: i64,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let subject = match load_subject(&storage, subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };

    let list_query = AbsentListQuery {
        page: Some(query.page),
        size: Some(query.size),
        subject_id: Some(subject.id),
        ..Default::default()
    };
    match storage.list_absents_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Absent list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve absents", &e)),
    }
}
