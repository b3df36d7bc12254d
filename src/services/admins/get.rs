use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::models::{ApiResponse, ErrorCode, admins::responses::AdminResponse};
use crate::services::{internal_error, not_found};

pub async fn get_admin(
    service: &AdminService,
    admin_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_admin_by_id(admin_id).await {
        Ok(Some(admin)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AdminResponse { admin },
            "Admin information retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::AdminNotFound, "Admin not found")),
        Err(e) => Ok(internal_error("Failed to retrieve admin", &e)),
    }
}
