use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::UserRole;
use crate::models::seasons::requests::CreateSeasonRequest;
use crate::services::SeasonService;
use crate::utils::SafeSeason;

static SEASON_SERVICE: Lazy<SeasonService> = Lazy::new(SeasonService::new_lazy);

pub async fn list_seasons(req: HttpRequest) -> ActixResult<HttpResponse> {
    SEASON_SERVICE.list_seasons(&req).await
}

pub async fn create_season(
    req: HttpRequest,
    season_data: web::Json<CreateSeasonRequest>,
) -> ActixResult<HttpResponse> {
    SEASON_SERVICE
        .create_season(season_data.into_inner(), &req)
        .await
}

pub async fn get_current_season(req: HttpRequest) -> ActixResult<HttpResponse> {
    SEASON_SERVICE.get_current_season(&req).await
}

pub async fn set_current_season(req: HttpRequest, season: SafeSeason) -> ActixResult<HttpResponse> {
    SEASON_SERVICE.set_current_season(season.0, &req).await
}

// 配置路由
pub fn configure_season_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin/seasons")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_seasons)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    // 学期管理仅超级管理员
                    .route(
                        web::post()
                            .to(create_season)
                            .wrap(middlewares::RequireRole::new(&UserRole::SuperAdmin)),
                    ),
            )
            .service(
                web::resource("/current").route(
                    web::get()
                        .to(get_current_season)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/{season}/current").route(
                    web::put()
                        .to(set_current_season)
                        .wrap(middlewares::RequireRole::new(&UserRole::SuperAdmin)),
                ),
            ),
    );
}
