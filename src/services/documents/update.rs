use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DocumentService, ensure_target_in_season, load_document};
use crate::models::{
    ApiResponse, ErrorCode,
    audit_logs::entities::AuditAction,
    documents::{requests::UpdateDocumentRequest, responses::DocumentResponse},
};
use crate::services::access::{current_admin, ensure_season_writable};
use crate::services::{bad_request, internal_error, not_found, record_audit};

pub async fn update_document(
    service: &DocumentService,
    document_id: i64,
    update_data: UpdateDocumentRequest,
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
    let document = match load_document(&storage, document_id).await {
        Ok(document) => document,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, document.season).await {
        return Ok(resp);
    }
    if update_data.doc_type.is_some()
        && let Err(resp) = ensure_target_in_season(
            &storage,
            document.season,
            update_data.student_id,
            update_data.subject_id,
        )
        .await
    {
        return Ok(resp);
    }

    match storage.update_document(document_id, update_data).await {
        Ok(Some(document)) => {
            record_audit(
                request,
                &operator,
                AuditAction::Update,
                format!("Updated document {}", document.name),
                Some(document.season),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                DocumentResponse { document },
                "Document updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::DocumentNotFound, "Document not found")),
        Err(e) => Ok(internal_error("Document update failed", &e)),
    }
}
