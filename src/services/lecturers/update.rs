use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LecturerService;
use crate::models::{
    ApiResponse, ErrorCode,
    audit_logs::entities::AuditAction,
    lecturers::{requests::UpdateLecturerRequest, responses::LecturerResponse},
};
use crate::services::access::{current_admin, ensure_writer};
use crate::services::{bad_request, internal_error, not_found, record_audit};

pub async fn update_lecturer(
    service: &LecturerService,
    lecturer_id: i64,
    update_data: UpdateLecturerRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_writer(&operator) {
        return Ok(resp);
    }
    if let Err(msg) = update_data.validate() {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);
    match storage.update_lecturer(lecturer_id, update_data).await {
        Ok(Some(lecturer)) => {
            record_audit(
                request,
                &operator,
                AuditAction::Update,
                format!("Updated lecturer {}", lecturer.id),
                None,
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                LecturerResponse { lecturer },
                "Lecturer updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::LecturerNotFound, "Lecturer not found")),
        Err(e) => Ok(internal_error("Lecturer update failed", &e)),
    }
}
