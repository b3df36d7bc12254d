use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, load_subject};
use crate::models::{ApiResponse, ErrorCode, audit_logs::entities::AuditAction};
use crate::services::access::{current_admin, ensure_season_writable};
use crate::services::{internal_error, not_found, record_audit};

pub async fn delete_subject(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let subject = match load_subject(&storage, subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, subject.season).await {
        return Ok(resp);
    }

    match storage.delete_subject(subject_id).await {
        Ok(true) => {
            record_audit(
                request,
                &operator,
                AuditAction::Delete,
                format!("Deleted subject {}", subject.code),
                Some(subject.season),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => Ok(internal_error("Subject deletion failed", &e)),
    }
}
