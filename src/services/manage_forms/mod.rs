pub mod get;
pub mod upsert;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::manage_forms::entities::FormType;
use crate::models::manage_forms::requests::{ManageFormQuery, UpsertManageFormRequest};
use crate::storage::Storage;

pub struct ManageFormService {
    storage: Option<Arc<dyn Storage>>,
}

impl ManageFormService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn get_form(
        &self,
        form_type: FormType,
        query: ManageFormQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_form(self, form_type, query, request).await
    }

    // 开启或关闭表单
    pub async fn upsert_form(
        &self,
        form_type: FormType,
        form_data: UpsertManageFormRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        upsert::upsert_form(self, form_type, form_data, request).await
    }
}
