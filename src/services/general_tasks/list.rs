use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GeneralTaskService;
use crate::models::{
    ApiResponse,
    general_tasks::requests::{GeneralTaskListParams, GeneralTaskListQuery},
};
use crate::services::internal_error;

pub async fn list_tasks(
    service: &GeneralTaskService,
    query: GeneralTaskListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = GeneralTaskListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        season: query.season,
        role: query.role,
        task_type: query.task_type,
        status: query.status,
    };

    match storage.list_general_tasks_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Task list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve task list", &e)),
    }
}
