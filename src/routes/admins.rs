use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::admins::requests::{AdminListParams, CreateAdminRequest, UpdateAdminRequest};
use crate::models::auth::UserRole;
use crate::services::AdminService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AdminService 实例
static ADMIN_SERVICE: Lazy<AdminService> = Lazy::new(AdminService::new_lazy);

pub async fn list_admins(
    req: HttpRequest,
    query: web::Query<AdminListParams>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.list_admins(query.into_inner(), &req).await
}

pub async fn create_admin(
    req: HttpRequest,
    admin_data: web::Json<CreateAdminRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.create_admin(admin_data.into_inner(), &req).await
}

pub async fn get_admin(req: HttpRequest, admin_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.get_admin(admin_id.0, &req).await
}

pub async fn update_admin(
    req: HttpRequest,
    admin_id: SafeIDI64,
    update_data: web::Json<UpdateAdminRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .update_admin(admin_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_admin(req: HttpRequest, admin_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.delete_admin(admin_id.0, &req).await
}

// 配置路由
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin/admins")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(&UserRole::SuperAdmin))
                    .route("", web::get().to(list_admins))
                    .route("", web::post().to(create_admin))
                    .route("/{id}", web::get().to(get_admin))
                    .route("/{id}", web::put().to(update_admin))
                    .route("/{id}", web::delete().to(delete_admin)),
            ),
    );
}
