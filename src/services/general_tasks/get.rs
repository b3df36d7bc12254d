use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GeneralTaskService, load_task};
use crate::models::{ApiResponse, general_tasks::responses::GeneralTaskResponse};

pub async fn get_task(
    service: &GeneralTaskService,
    task_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_task(&storage, task_id).await {
        Ok(task) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GeneralTaskResponse { task },
            "Task retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
