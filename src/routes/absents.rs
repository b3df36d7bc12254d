use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::absents::requests::{
    AbsentListParams, CreateAbsentRequest, UpdateAbsentRequest,
};
use crate::models::auth::UserRole;
use crate::services::AbsentService;
use crate::utils::SafeIDI64;

static ABSENT_SERVICE: Lazy<AbsentService> = Lazy::new(AbsentService::new_lazy);

pub async fn list_absents(
    req: HttpRequest,
    query: web::Query<AbsentListParams>,
) -> ActixResult<HttpResponse> {
    ABSENT_SERVICE.list_absents(query.into_inner(), &req).await
}

pub async fn create_absent(
    req: HttpRequest,
    absent_data: web::Json<CreateAbsentRequest>,
) -> ActixResult<HttpResponse> {
    ABSENT_SERVICE
        .create_absent(absent_data.into_inner(), &req)
        .await
}

pub async fn update_absent(
    req: HttpRequest,
    absent_id: SafeIDI64,
    update_data: web::Json<UpdateAbsentRequest>,
) -> ActixResult<HttpResponse> {
    ABSENT_SERVICE
        .update_absent(absent_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_absent(req: HttpRequest, absent_id: SafeIDI64) -> ActixResult<HttpResponse> {
    ABSENT_SERVICE.delete_absent(absent_id.0, &req).await
}

// 配置路由
pub fn configure_absent_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin/absents")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_absents))
                    .route("", web::post().to(create_absent))
                    .route("/{id}", web::put().to(update_absent))
                    .route("/{id}", web::delete().to(delete_absent)),
            ),
    );
}
