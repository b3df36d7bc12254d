use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::RollCallService;
use crate::jobs::Job;
use crate::models::{
    ApiResponse, ErrorCode, roll_call::requests::RollCallQueryParams,
    tasks::responses::TaskAcceptedResponse,
};
use crate::services::access::resolve_season;
use crate::services::{internal_error, task_queue_from_request};

pub async fn export_report(
    service: &RollCallService,
    query: RollCallQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(queue) = task_queue_from_request(request) else {
        return Ok(
            HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                ErrorCode::TaskQueueUnavailable,
                "Task queue is not available",
            )),
        );
    };

    let storage = service.get_storage(request);
    let season = match resolve_season(&storage, query.season).await {
        Ok(season) => season,
        Err(resp) => return Ok(resp),
    };

    match queue
        .submit_tracked("roll_call_report", |task_id| Job::RollCallReport {
            task_id,
            season,
        })
        .await
    {
        Ok(task) => {
            info!("Roll call report of season {} queued as {}", season, task.task_id);
            Ok(HttpResponse::Accepted().json(ApiResponse::success(
                TaskAcceptedResponse {
                    task_id: task.task_id,
                    status: task.status,
                },
                "Report generation started",
            )))
        }
        Err(e) => Ok(internal_error("Failed to queue report", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::models::tasks::entities::TaskStatus;
    use crate::services::test_support::{TestEnv, body_json};

    #[actix_web::test]
    async fn test_export_report_produces_csv_task_result() {
        let env = TestEnv::new().await;
        let viewer = env.admin(UserRole::Viewer).await;
        let subject = env.subject(1, "CSV-1").await;
        let student = env.student(1, 1, "csv@example.com").await;
        env.storage
            .replace_student_registrations(student.id, 1, &[subject.id])
            .await
            .unwrap();

        let resp = RollCallService::new_lazy()
            .export_report(RollCallQueryParams::default(), &env.as_admin(&viewer))
            .await
            .unwrap();
        assert_eq!(resp.status(), 202);
        let body = body_json(resp).await;
        let task_id = body["data"]["task_id"].as_str().unwrap().to_string();

        let mut task = None;
        for _ in 0..100 {
            let current = env.storage.get_task_result(&task_id).await.unwrap().unwrap();
            if current.status.is_finished() {
                task = Some(current);
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        let task = task.expect("report task should finish");
        assert_eq!(task.status, TaskStatus::Success);
        let csv = task.result.unwrap()["csv"].as_str().unwrap().to_string();
        assert!(csv.contains("csv@example.com"));
    }
}
