use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DocumentService;
use crate::models::{
    ApiResponse,
    documents::requests::{DocumentListParams, DocumentListQuery},
};
use crate::services::internal_error;

pub async fn list_documents(
    service: &DocumentService,
    query: DocumentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = DocumentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        season: query.season,
        doc_type: query.doc_type,
        student_id: query.student_id,
        subject_id: query.subject_id,
        search: query.search,
    };

    match storage.list_documents_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Document list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve document list", &e)),
    }
}
