use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DocumentService, ensure_target_in_season};
use crate::models::{
    ApiResponse,
    audit_logs::entities::AuditAction,
    documents::{
        requests::{CreateDocumentRequest, NewDocument},
        responses::DocumentResponse,
    },
};
use crate::services::access::{current_admin, ensure_season_writable, resolve_season};
use crate::services::{bad_request, internal_error, record_audit};

pub async fn create_document(
    service: &DocumentService,
    document_data: CreateDocumentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };
    if let Err(msg) = document_data.validate() {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);
    let season = match resolve_season(&storage, document_data.season).await {
        Ok(season) => season,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, season).await {
        return Ok(resp);
    }
    if let Err(resp) = ensure_target_in_season(
        &storage,
        season,
        document_data.student_id,
        document_data.subject_id,
    )
    .await
    {
        return Ok(resp);
    }

    let new_document = NewDocument {
        season,
        name: document_data.name.trim().to_string(),
        file_id: document_data.file_id.trim().to_string(),
        mimetype: document_data.mimetype,
        doc_type: document_data.doc_type,
        student_id: document_data.student_id,
        subject_id: document_data.subject_id,
        description: document_data.description,
        created_by: operator.id,
    };

    match storage.create_document(new_document).await {
        Ok(document) => {
            record_audit(
                request,
                &operator,
                AuditAction::Create,
                format!("Created {} document {}", document.doc_type, document.name),
                Some(document.season),
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                DocumentResponse { document },
                "Document created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Document creation failed", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::models::documents::entities::DocumentType;
    use crate::services::test_support::TestEnv;

    fn request(doc_type: DocumentType, student_id: Option<i64>) -> CreateDocumentRequest {
        CreateDocumentRequest {
            season: None,
            name: "Giáo trình".to_string(),
            file_id: "drive-file-1".to_string(),
            mimetype: Some("application/pdf".to_string()),
            doc_type,
            student_id,
            subject_id: None,
            description: None,
        }
    }

    #[actix_web::test]
    async fn test_student_document_target_must_be_in_season() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let other_season = env.student(2, 1, "s2@example.com").await;
        let current = env.student(1, 1, "s1@example.com").await;
        let service = DocumentService::new_lazy();

        let resp = service
            .create_document(
                request(DocumentType::Student, Some(other_season.id)),
                &env.as_admin(&admin),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);

        let resp = service
            .create_document(
                request(DocumentType::Student, Some(current.id)),
                &env.as_admin(&admin),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);

        let resp = service
            .create_document(request(DocumentType::Student, None), &env.as_admin(&admin))
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
    }
}
