use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{ApiResponse, ErrorCode, tasks::responses::TaskResultResponse};
use crate::storage::Storage;

pub struct TaskService {
    storage: Option<Arc<dyn Storage>>,
}

impl TaskService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 查询后台任务结果
    pub async fn get_task(&self, task_id: &str, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.get_task_result(task_id).await {
            Ok(Some(task)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                TaskResultResponse { task },
                "Task result retrieved successfully",
            ))),
            Ok(None) => Ok(super::not_found(ErrorCode::TaskNotFound, "Task not found")),
            Err(e) => Ok(super::internal_error("Failed to retrieve task result", &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::services::test_support::TestEnv;

    #[actix_web::test]
    async fn test_get_task_result() {
        let env = TestEnv::new().await;
        let viewer = env.admin(UserRole::Viewer).await;
        let task = env
            .storage
            .create_task_result("7c1b0a7e-0000-4000-8000-000000000001", "roll_call_report")
            .await
            .unwrap();
        let service = TaskService::new_lazy();

        let resp = service.get_task(&task.task_id, &env.as_admin(&viewer)).await.unwrap();
        assert_eq!(resp.status(), 200);
        let resp = service
            .get_task("7c1b0a7e-0000-4000-8000-00000000ffff", &env.as_admin(&viewer))
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
    }
}
