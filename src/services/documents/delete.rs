use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DocumentService, load_document};
use crate::models::{ApiResponse, ErrorCode, audit_logs::entities::AuditAction};
use crate::services::access::{current_admin, ensure_season_writable};
use crate::services::{internal_error, not_found, record_audit};

pub async fn delete_document(
    service: &DocumentService,
    document_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let document = match load_document(&storage, document_id).await {
        Ok(document) => document,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, document.season).await {
        return Ok(resp);
    }

    match storage.delete_document(document_id).await {
        Ok(true) => {
            record_audit(
                request,
                &operator,
                AuditAction::Delete,
                format!("Deleted document {}", document.name),
                Some(document.season),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Document deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::DocumentNotFound, "Document not found")),
        Err(e) => Ok(internal_error("Document deletion failed", &e)),
    }
}
