pub mod absents;
pub mod create;
pub mod delete;
pub mod evaluations;
pub mod get;
pub mod list;
pub mod registrations;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::common::PaginationQuery;
use crate::models::subjects::entities::Subject;
use crate::models::subjects::requests::{
    CreateSubjectRequest, SubjectListParams, UpdateSubjectRequest,
};
use crate::models::ErrorCode;
use crate::storage::Storage;

pub struct SubjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubjectService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_subjects(
        &self,
        query: SubjectListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_subjects(self, query, request).await
    }

    // 创建科目，讲师需存在
    pub async fn create_subject(
        &self,
        subject_data: CreateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_subject(self, subject_data, request).await
    }

    // 科目详情（附带讲师）
    pub async fn get_subject(
        &self,
        subject_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_subject(self, subject_id, request).await
    }

    pub async fn update_subject(
        &self,
        subject_id: i64,
        update_data: UpdateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_subject(self, subject_id, update_data, request).await
    }

    pub async fn delete_subject(
        &self,
        subject_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_subject(self, subject_id, request).await
    }

    // 科目的报名学员
    pub async fn list_registrations(
        &self,
        subject_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        registrations::list_registrations(self, subject_id, request).await
    }

    // 科目的评价及汇总
    pub async fn list_evaluations(
        &self,
        subject_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        evaluations::list_evaluations(self, subject_id, request).await
    }

    // 科目的缺勤申请
    pub async fn list_absents(
        &self,
        subject_id: i64,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        absents::list_absents(self, subject_id, query, request).await
    }
}

pub(crate) async fn load_subject(
    storage: &Arc<dyn Storage>,
    subject_id: i64,
) -> Result<Subject, HttpResponse> {
    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(subject)) => Ok(subject),
        Ok(None) => Err(super::not_found(
            ErrorCode::SubjectNotFound,
            "Subject not found",
        )),
        Err(e) => Err(super::internal_error("Failed to retrieve subject", &e)),
    }
}

/// 讲师必须存在且未删除
pub(crate) async fn ensure_lecturer_exists(
    storage: &Arc<dyn Storage>,
    lecturer_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_lecturer_by_id(lecturer_id).await {
        Ok(Some(lecturer)) if !lecturer.status.is_deleted() => Ok(()),
        Ok(_) => Err(super::not_found(
            ErrorCode::LecturerNotFound,
            format!("Lecturer {lecturer_id} not found"),
        )),
        Err(e) => Err(super::internal_error("Failed to retrieve lecturer", &e)),
    }
}
