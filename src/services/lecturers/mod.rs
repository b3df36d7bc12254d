pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::lecturers::requests::{
    CreateLecturerRequest, LecturerListParams, UpdateLecturerRequest,
};
use crate::storage::Storage;

pub struct LecturerService {
    storage: Option<Arc<dyn Storage>>,
}

impl LecturerService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_lecturers(
        &self,
        query: LecturerListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_lecturers(self, query, request).await
    }

    pub async fn create_lecturer(
        &self,
        lecturer_data: CreateLecturerRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_lecturer(self, lecturer_data, request).await
    }

    pub async fn get_lecturer(
        &self,
        lecturer_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_lecturer(self, lecturer_id, request).await
    }

    pub async fn update_lecturer(
        &self,
        lecturer_id: i64,
        update_data: UpdateLecturerRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_lecturer(self, lecturer_id, update_data, request).await
    }

    pub async fn delete_lecturer(
        &self,
        lecturer_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_lecturer(self, lecturer_id, request).await
    }
}
