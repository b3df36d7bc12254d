pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::audit_logs::requests::AuditLogListParams;
use crate::storage::Storage;

pub struct AuditLogService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuditLogService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_audit_logs(
        &self,
        query: AuditLogListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_audit_logs(self, query, request).await
    }
}
