use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::audit_logs::requests::AuditLogListParams;
use crate::models::auth::UserRole;
use crate::services::{AuditLogService, TaskService};
use crate::utils::SafeTaskId;

static AUDIT_LOG_SERVICE: Lazy<AuditLogService> = Lazy::new(AuditLogService::new_lazy);
static TASK_SERVICE: Lazy<TaskService> = Lazy::new(TaskService::new_lazy);

pub async fn list_audit_logs(
    req: HttpRequest,
    query: web::Query<AuditLogListParams>,
) -> ActixResult<HttpResponse> {
    AUDIT_LOG_SERVICE
        .list_audit_logs(query.into_inner(), &req)
        .await
}

// 后台任务状态
pub async fn get_task(req: HttpRequest, task_id: SafeTaskId) -> ActixResult<HttpResponse> {
    TASK_SERVICE.get_task(&task_id.0, &req).await
}

// 配置路由
pub fn configure_audit_log_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin/audit-logs")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_audit_logs)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/admin/tasks")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("/{task_id}", web::get().to(get_task)),
            ),
    );
}
