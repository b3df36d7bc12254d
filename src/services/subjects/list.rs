use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{
    ApiResponse,
    subjects::requests::{SubjectListParams, SubjectListQuery},
};
use crate::services::internal_error;

pub async fn list_subjects(
    service: &SubjectService,
    query: SubjectListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = SubjectListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        season: query.season,
        lecturer_id: query.lecturer_id,
        status: query.status,
        search: query.search,
    };

    match storage.list_subjects_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Subject list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve subject list", &e)),
    }
}
