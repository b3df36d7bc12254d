use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SeasonService;
use crate::models::{
    ApiResponse, ErrorCode, audit_logs::entities::AuditAction, seasons::responses::SeasonResponse,
};
use crate::services::access::{current_admin, current_season};
use crate::services::{internal_error, not_found, record_audit};

pub async fn get_current_season(
    service: &SeasonService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match current_season(&storage).await {
        Ok(season) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SeasonResponse { season },
            "Current season retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}

pub async fn set_current_season(
    service: &SeasonService,
    season: i32,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    match storage.set_current_season(season).await {
        Ok(Some(season)) => {
            info!("Current season switched to {}", season.season);
            record_audit(
                request,
                &operator,
                AuditAction::Update,
                format!("Set season {} as current", season.season),
                Some(season.season),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SeasonResponse { season },
                "Current season updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::SeasonNotFound, "Season not found")),
        Err(e) => Ok(internal_error("Failed to set current season", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::services::test_support::TestEnv;

    #[actix_web::test]
    async fn test_switch_current_season() {
        let env = TestEnv::new().await;
        let root = env.admin(UserRole::SuperAdmin).await;
        let service = SeasonService::new_lazy();

        let resp = service.set_current_season(2, &env.as_admin(&root)).await.unwrap();
        assert_eq!(resp.status(), 200);

        let seasons = env.storage.list_seasons().await.unwrap();
        let current: Vec<i32> = seasons
            .iter()
            .filter(|s| s.is_current)
            .map(|s| s.season)
            .collect();
        assert_eq!(current, vec![2]);

        let resp = service.set_current_season(42, &env.as_admin(&root)).await.unwrap();
        assert_eq!(resp.status(), 404);
    }
}
