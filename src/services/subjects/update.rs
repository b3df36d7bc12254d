use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, ensure_lecturer_exists, load_subject};
use crate::models::{
    ApiResponse, ErrorCode,
    audit_logs::entities::AuditAction,
    subjects::{requests::UpdateSubjectRequest, responses::SubjectResponse},
};
use crate::services::access::{current_admin, ensure_season_writable};
use crate::services::{bad_request, not_found, record_audit, storage_failure};

pub async fn update_subject(
    service: &SubjectService,
    subject_id: i64,
    update_data: UpdateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };
    if let Err(msg) = update_data.validate() {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);
    let subject = match load_subject(&storage, subject_id).await {
        Ok(subject) => subject,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, subject.season).await {
        return Ok(resp);
    }
    if let Some(lecturer_id) = update_data.lecturer_id
        && subject.lecturer_id != Some(lecturer_id)
        && let Err(resp) = ensure_lecturer_exists(&storage, lecturer_id).await
    {
        return Ok(resp);
    }

    match storage.update_subject(subject_id, update_data).await {
        Ok(Some(subject)) => {
            record_audit(
                request,
                &operator,
                AuditAction::Update,
                format!("Updated subject {}", subject.code),
                Some(subject.season),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubjectResponse { subject },
                "Subject updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => Ok(storage_failure(
            "Subject update failed",
            &e,
            (
                ErrorCode::SubjectAlreadyExists,
                "Subject code already exists in this season",
            ),
        )),
    }
}
