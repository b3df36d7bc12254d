pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::documents::entities::Document;
use crate::models::documents::requests::{
    CreateDocumentRequest, DocumentListParams, UpdateDocumentRequest,
};
use crate::storage::Storage;

pub struct DocumentService {
    storage: Option<Arc<dyn Storage>>,
}

impl DocumentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_documents(
        &self,
        query: DocumentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_documents(self, query, request).await
    }

    pub async fn create_document(
        &self,
        document_data: CreateDocumentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_document(self, document_data, request).await
    }

    pub async fn get_document(
        &self,
        document_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_document(self, document_id, request).await
    }

    pub async fn update_document(
        &self,
        document_id: i64,
        update_data: UpdateDocumentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_document(self, document_id, update_data, request).await
    }

    pub async fn delete_document(
        &self,
        document_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_document(self, document_id, request).await
    }
}

pub(crate) async fn load_document(
    storage: &Arc<dyn Storage>,
    document_id: i64,
) -> Result<Document, HttpResponse> {
    match storage.get_document_by_id(document_id).await {
        Ok(Some(document)) => Ok(document),
        Ok(None) => Err(super::not_found(
            ErrorCode::DocumentNotFound,
            "Document not found",
        )),
        Err(e) => Err(super::internal_error("Failed to retrieve document", &e)),
    }
}

/// 文档关联的学员 / 科目必须属于文档所在学期
pub(crate) async fn ensure_target_in_season(
    storage: &Arc<dyn Storage>,
    season: i32,
    student_id: Option<i64>,
    subject_id: Option<i64>,
) -> Result<(), HttpResponse> {
    if let Some(student_id) = student_id {
        match storage.get_student_by_id(student_id).await {
            Ok(Some(student)) if student.season == season && !student.status.is_deleted() => {}
            Ok(_) => {
                return Err(super::not_found(
                    ErrorCode::StudentNotFound,
                    format!("Student {student_id} not found in season {season}"),
                ));
            }
            Err(e) => return Err(super::internal_error("Failed to retrieve student", &e)),
        }
    }
    if let Some(subject_id) = subject_id {
        match storage.get_subject_by_id(subject_id).await {
            Ok(Some(subject)) if subject.season == season && !subject.status.is_deleted() => {}
            Ok(_) => {
                return Err(super::not_found(
                    ErrorCode::SubjectNotFound,
                    format!("Subject {subject_id} not found in season {season}"),
                ));
            }
            Err(e) => return Err(super::internal_error("Failed to retrieve subject", &e)),
        }
    }
    Ok(())
}
