use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SeasonService;
use crate::models::{ApiResponse, seasons::responses::SeasonListResponse};
use crate::services::internal_error;

pub async fn list_seasons(
    service: &SeasonService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_seasons().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SeasonListResponse { items },
            "Season list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve season list", &e)),
    }
}
