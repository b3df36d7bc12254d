use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::UserRole;
use crate::models::lecturers::requests::{
    CreateLecturerRequest, LecturerListParams, UpdateLecturerRequest,
};
use crate::services::LecturerService;
use crate::utils::SafeIDI64;

static LECTURER_SERVICE: Lazy<LecturerService> = Lazy::new(LecturerService::new_lazy);

pub async fn list_lecturers(
    req: HttpRequest,
    query: web::Query<LecturerListParams>,
) -> ActixResult<HttpResponse> {
    LECTURER_SERVICE.list_lecturers(query.into_inner(), &req).await
}

pub async fn create_lecturer(
    req: HttpRequest,
    lecturer_data: web::Json<CreateLecturerRequest>,
) -> ActixResult<HttpResponse> {
    LECTURER_SERVICE
        .create_lecturer(lecturer_data.into_inner(), &req)
        .await
}

pub async fn get_lecturer(req: HttpRequest, lecturer_id: SafeIDI64) -> ActixResult<HttpResponse> {
    LECTURER_SERVICE.get_lecturer(lecturer_id.0, &req).await
}

pub async fn update_lecturer(
    req: HttpRequest,
    lecturer_id: SafeIDI64,
    update_data: web::Json<UpdateLecturerRequest>,
) -> ActixResult<HttpResponse> {
    LECTURER_SERVICE
        .update_lecturer(lecturer_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_lecturer(
    req: HttpRequest,
    lecturer_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    LECTURER_SERVICE.delete_lecturer(lecturer_id.0, &req).await
}

// 配置路由
pub fn configure_lecturer_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin/lecturers")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_lecturers))
                    .route("", web::post().to(create_lecturer))
                    .route("/{id}", web::get().to(get_lecturer))
                    .route("/{id}", web::put().to(update_lecturer))
                    .route("/{id}", web::delete().to(delete_lecturer)),
            ),
    );
}
