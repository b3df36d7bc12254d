use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SeasonService;
use crate::models::{
    ApiResponse, ErrorCode,
    audit_logs::entities::AuditAction,
    seasons::{requests::CreateSeasonRequest, responses::SeasonResponse},
};
use crate::services::access::current_admin;
use crate::services::{bad_request, record_audit, storage_failure};

pub async fn create_season(
    service: &SeasonService,
    season_data: CreateSeasonRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = season_data.validate() {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);
    match storage.create_season(season_data).await {
        Ok(season) => {
            info!(
                "Season {} created (current: {})",
                season.season, season.is_current
            );
            record_audit(
                request,
                &operator,
                AuditAction::Create,
                format!("Created season {}", season.season),
                Some(season.season),
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                SeasonResponse { season },
                "Season created successfully",
            )))
        }
        Err(e) => Ok(storage_failure(
            "Season creation failed",
            &e,
            (ErrorCode::SeasonAlreadyExists, "Season already exists"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::services::test_support::TestEnv;

    #[actix_web::test]
    async fn test_duplicate_season_conflicts() {
        let env = TestEnv::new().await;
        let root = env.admin(UserRole::SuperAdmin).await;
        let service = SeasonService::new_lazy();
        let request = |season| CreateSeasonRequest {
            season,
            name: format!("Khóa {season}"),
            academic_year: Some("2026-2027".to_string()),
            set_current: false,
        };

        let resp = service.create_season(request(3), &env.as_admin(&root)).await.unwrap();
        assert_eq!(resp.status(), 201);
        let resp = service.create_season(request(3), &env.as_admin(&root)).await.unwrap();
        assert_eq!(resp.status(), 409);
        let resp = service.create_season(request(0), &env.as_admin(&root)).await.unwrap();
        assert_eq!(resp.status(), 400);
    }
}
