use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GeneralTaskService, load_task};
use crate::models::{
    ApiResponse, ErrorCode,
    audit_logs::entities::AuditAction,
    general_tasks::{requests::UpdateGeneralTaskRequest, responses::GeneralTaskResponse},
};
use crate::services::access::{current_admin, ensure_season_writable};
use crate::services::{bad_request, internal_error, not_found, record_audit};

pub async fn update_task(
    service: &GeneralTaskService,
    task_id: i64,
    update_data: UpdateGeneralTaskRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let task = match load_task(&storage, task_id).await {
        Ok(task) => task,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, task.season).await {
        return Ok(resp);
    }
    // 起止时间与现有值合并后校验
    if let Err(msg) = update_data.validate(task.start_at, task.end_at) {
        return Ok(bad_request(msg));
    }

    match storage.update_general_task(task_id, update_data).await {
        Ok(Some(task)) => {
            record_audit(
                request,
                &operator,
                AuditAction::Update,
                format!("Updated task {}", task.title),
                Some(task.season),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                GeneralTaskResponse { task },
                "Task updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::GeneralTaskNotFound, "Task not found")),
        Err(e) => Ok(internal_error("Task update failed", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::models::general_tasks::entities::GeneralTaskType;
    use crate::models::general_tasks::requests::NewGeneralTask;
    use crate::services::test_support::TestEnv;
    use chrono::{Duration, Utc};

    #[actix_web::test]
    async fn test_update_rejects_end_before_existing_start() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let now = Utc::now();
        let task = env
            .storage
            .create_general_task(NewGeneralTask {
                season: 1,
                title: "Họp giáo vụ".to_string(),
                description: None,
                role: UserRole::Admin,
                task_type: GeneralTaskType::Common,
                start_at: now,
                end_at: now + Duration::days(3),
                document_ids: vec![],
                created_by: admin.id,
            })
            .await
            .unwrap();

        let resp = GeneralTaskService::new_lazy()
            .update_task(
                task.id,
                UpdateGeneralTaskRequest {
                    end_at: Some(now - Duration::days(1)),
                    ..Default::default()
                },
                &env.as_admin(&admin),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
    }
}
