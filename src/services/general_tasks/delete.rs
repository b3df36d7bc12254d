use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GeneralTaskService, load_task};
use crate::models::{ApiResponse, ErrorCode, audit_logs::entities::AuditAction};
use crate::services::access::{current_admin, ensure_season_writable};
use crate::services::{internal_error, not_found, record_audit};

pub async fn delete_task(
    service: &GeneralTaskService,
    task_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let task = match load_task(&storage, task_id).await {
        Ok(task) => task,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, task.season).await {
        return Ok(resp);
    }

    match storage.delete_general_task(task_id).await {
        Ok(true) => {
            record_audit(
                request,
                &operator,
                AuditAction::Delete,
                format!("Deleted task {}", task.title),
                Some(task.season),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Task deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::GeneralTaskNotFound, "Task not found")),
        Err(e) => Ok(internal_error("Task deletion failed", &e)),
    }
}
