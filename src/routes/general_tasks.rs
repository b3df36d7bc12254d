use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::UserRole;
use crate::models::general_tasks::requests::{
    CreateGeneralTaskRequest, GeneralTaskListParams, UpdateGeneralTaskRequest,
};
use crate::services::GeneralTaskService;
use crate::utils::SafeIDI64;

static GENERAL_TASK_SERVICE: Lazy<GeneralTaskService> = Lazy::new(GeneralTaskService::new_lazy);

pub async fn list_tasks(
    req: HttpRequest,
    query: web::Query<GeneralTaskListParams>,
) -> ActixResult<HttpResponse> {
    GENERAL_TASK_SERVICE.list_tasks(query.into_inner(), &req).await
}

pub async fn create_task(
    req: HttpRequest,
    task_data: web::Json<CreateGeneralTaskRequest>,
) -> ActixResult<HttpResponse> {
    GENERAL_TASK_SERVICE
        .create_task(task_data.into_inner(), &req)
        .await
}

pub async fn get_task(req: HttpRequest, task_id: SafeIDI64) -> ActixResult<HttpResponse> {
    GENERAL_TASK_SERVICE.get_task(task_id.0, &req).await
}

pub async fn update_task(
    req: HttpRequest,
    task_id: SafeIDI64,
    update_data: web::Json<UpdateGeneralTaskRequest>,
) -> ActixResult<HttpResponse> {
    GENERAL_TASK_SERVICE
        .update_task(task_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_task(req: HttpRequest, task_id: SafeIDI64) -> ActixResult<HttpResponse> {
    GENERAL_TASK_SERVICE.delete_task(task_id.0, &req).await
}

// 配置路由
pub fn configure_general_task_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin/general-tasks")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_tasks))
                    .route("", web::post().to(create_task))
                    .route("/{id}", web::get().to(get_task))
                    .route("/{id}", web::put().to(update_task))
                    .route("/{id}", web::delete().to(delete_task)),
            ),
    );
}
