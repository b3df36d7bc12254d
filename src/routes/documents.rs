use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::UserRole;
use crate::models::documents::requests::{
    CreateDocumentRequest, DocumentListParams, UpdateDocumentRequest,
};
use crate::services::DocumentService;
use crate::utils::SafeIDI64;

static DOCUMENT_SERVICE: Lazy<DocumentService> = Lazy::new(DocumentService::new_lazy);

pub async fn list_documents(
    req: HttpRequest,
    query: web::Query<DocumentListParams>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.list_documents(query.into_inner(), &req).await
}

pub async fn create_document(
    req: HttpRequest,
    document_data: web::Json<CreateDocumentRequest>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .create_document(document_data.into_inner(), &req)
        .await
}

pub async fn get_document(req: HttpRequest, document_id: SafeIDI64) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.get_document(document_id.0, &req).await
}

pub async fn update_document(
    req: HttpRequest,
    document_id: SafeIDI64,
    update_data: web::Json<UpdateDocumentRequest>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .update_document(document_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_document(
    req: HttpRequest,
    document_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.delete_document(document_id.0, &req).await
}

// 配置路由
pub fn configure_document_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin/documents")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_documents))
                    .route("", web::post().to(create_document))
                    .route("/{id}", web::get().to(get_document))
                    .route("/{id}", web::put().to(update_document))
                    .route("/{id}", web::delete().to(delete_document)),
            ),
    );
}
