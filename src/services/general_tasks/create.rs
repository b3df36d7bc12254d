use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GeneralTaskService;
use crate::models::{
    ApiResponse,
    audit_logs::entities::AuditAction,
    general_tasks::{
        requests::{CreateGeneralTaskRequest, NewGeneralTask},
        responses::GeneralTaskResponse,
    },
};
use crate::services::access::{current_admin, ensure_season_writable, resolve_season};
use crate::services::{bad_request, internal_error, record_audit};

pub async fn create_task(
    service: &GeneralTaskService,
    task_data: CreateGeneralTaskRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };
    if let Err(msg) = task_data.validate() {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);
    let season = match resolve_season(&storage, task_data.season).await {
        Ok(season) => season,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, season).await {
        return Ok(resp);
    }

    let new_task = NewGeneralTask {
        season,
        title: task_data.title.trim().to_string(),
        description: task_data.description,
        role: task_data.role,
        task_type: task_data.task_type,
        start_at: task_data.start_at,
        end_at: task_data.end_at,
        document_ids: task_data.document_ids,
        created_by: operator.id,
    };

    match storage.create_general_task(new_task).await {
        Ok(task) => {
            record_audit(
                request,
                &operator,
                AuditAction::Create,
                format!("Created task {}", task.title),
                Some(task.season),
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                GeneralTaskResponse { task },
                "Task created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Task creation failed", &e)),
    }
}
