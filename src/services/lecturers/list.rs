use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LecturerService;
use crate::models::{
    ApiResponse,
    lecturers::requests::{LecturerListParams, LecturerListQuery},
};
use crate::services::internal_error;

pub async fn list_lecturers(
    service: &LecturerService,
    query: LecturerListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = LecturerListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        status: query.status,
        search: query.search,
    };

    match storage.list_lecturers_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Lecturer list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve lecturer list", &e)),
    }
}
