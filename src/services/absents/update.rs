use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AbsentService, load_absent};
use crate::models::{
    ApiResponse, ErrorCode,
    absents::{requests::UpdateAbsentRequest, responses::AbsentResponse},
    audit_logs::entities::AuditAction,
};
use crate::services::access::{current_admin, ensure_season_writable};
use crate::services::{bad_request, internal_error, not_found, record_audit};

pub async fn update_absent(
    service: &AbsentService,
    absent_id: i64,
    update_data: UpdateAbsentRequest,
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
    let absent = match load_absent(&storage, absent_id).await {
        Ok(absent) => absent,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, absent.season).await {
        return Ok(resp);
    }

    match storage.update_absent(absent_id, update_data).await {
        Ok(Some(absent)) => {
            record_audit(
                request,
                &operator,
                AuditAction::Update,
                format!("Updated absent record {}", absent.id),
                Some(absent.season),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AbsentResponse { absent },
                "Absent record updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::AbsentNotFound, "Absent record not found")),
        Err(e) => Ok(internal_error("Absent update failed", &e)),
    }
}
