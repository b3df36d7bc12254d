use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LecturerService;
use crate::models::{ApiResponse, ErrorCode, lecturers::responses::LecturerResponse};
use crate::services::{internal_error, not_found};

pub async fn get_lecturer(
    service: &LecturerService,
    lecturer_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_lecturer_by_id(lecturer_id).await {
        Ok(Some(lecturer)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            LecturerResponse { lecturer },
            "Lecturer information retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::LecturerNotFound, "Lecturer not found")),
        Err(e) => Ok(internal_error("Failed to retrieve lecturer", &e)),
    }
}
