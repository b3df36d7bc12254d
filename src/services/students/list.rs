use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{
    ApiResponse,
    students::requests::{StudentListParams, StudentListQuery},
};
use crate::services::internal_error;

pub async fn list_students(
    service: &StudentService,
    query: StudentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = StudentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        season: query.season,
        status: query.status,
        search: query.search,
    };

    match storage.list_students_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Student list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve student list", &e)),
    }
}
