use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::UserRole;
use crate::models::roll_call::requests::RollCallQueryParams;
use crate::services::RollCallService;

static ROLL_CALL_SERVICE: Lazy<RollCallService> = Lazy::new(RollCallService::new_lazy);

pub async fn results(
    req: HttpRequest,
    query: web::Query<RollCallQueryParams>,
) -> ActixResult<HttpResponse> {
    ROLL_CALL_SERVICE.results(query.into_inner(), &req).await
}

pub async fn export_report(
    req: HttpRequest,
    query: web::Query<RollCallQueryParams>,
) -> ActixResult<HttpResponse> {
    ROLL_CALL_SERVICE
        .export_report(query.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_roll_call_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin/roll-call")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("/results", web::get().to(results))
                    .route("/results/export", web::post().to(export_report)),
            ),
    );
}
