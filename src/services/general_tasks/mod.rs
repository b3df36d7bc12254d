pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::general_tasks::entities::GeneralTask;
use crate::models::general_tasks::requests::{
    CreateGeneralTaskRequest, GeneralTaskListParams, UpdateGeneralTaskRequest,
};
use crate::storage::Storage;

pub struct GeneralTaskService {
    storage: Option<Arc<dyn Storage>>,
}

impl GeneralTaskService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_tasks(
        &self,
        query: GeneralTaskListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_tasks(self, query, request).await
    }

    pub async fn create_task(
        &self,
        task_data: CreateGeneralTaskRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_task(self, task_data, request).await
    }

    pub async fn get_task(&self, task_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_task(self, task_id, request).await
    }

    pub async fn update_task(
        &self,
        task_id: i64,
        update_data: UpdateGeneralTaskRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_task(self, task_id, update_data, request).await
    }

    // 工作任务为硬删除
    pub async fn delete_task(
        &self,
        task_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_task(self, task_id, request).await
    }
}

pub(crate) async fn load_task(
    storage: &Arc<dyn Storage>,
    task_id: i64,
) -> Result<GeneralTask, HttpResponse> {
    match storage.get_general_task_by_id(task_id).await {
        Ok(Some(task)) => Ok(task),
        Ok(None) => Err(super::not_found(
            ErrorCode::GeneralTaskNotFound,
            "Task not found",
        )),
        Err(e) => Err(super::internal_error("Failed to retrieve task", &e)),
    }
}
