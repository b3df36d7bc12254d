pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::absents::entities::Absent;
use crate::models::absents::requests::{AbsentListParams, CreateAbsentRequest, UpdateAbsentRequest};
use crate::storage::Storage;

pub struct AbsentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AbsentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_absents(
        &self,
        query: AbsentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_absents(self, query, request).await
    }

    // 管理员代学员登记缺勤
    pub async fn create_absent(
        &self,
        absent_data: CreateAbsentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_absent(self, absent_data, request).await
    }

    pub async fn update_absent(
        &self,
        absent_id: i64,
        update_data: UpdateAbsentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_absent(self, absent_id, update_data, request).await
    }

    pub async fn delete_absent(
        &self,
        absent_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_absent(self, absent_id, request).await
    }
}

pub(crate) async fn load_absent(
    storage: &Arc<dyn Storage>,
    absent_id: i64,
) -> Result<Absent, HttpResponse> {
    match storage.get_absent_by_id(absent_id).await {
        Ok(Some(absent)) => Ok(absent),
        Ok(None) => Err(super::not_found(
            ErrorCode::AbsentNotFound,
            "Absent record not found",
        )),
        Err(e) => Err(super::internal_error("Failed to retrieve absent record", &e)),
    }
}
