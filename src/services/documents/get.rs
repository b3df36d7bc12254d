use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DocumentService, load_document};
use crate::models::{ApiResponse, documents::responses::DocumentResponse};

pub async fn get_document(
    service: &DocumentService,
    document_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_document(&storage, document_id).await {
        Ok(document) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            DocumentResponse { document },
            "Document retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
