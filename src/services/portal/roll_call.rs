use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PortalService, student_and_season};
use crate::models::{ApiResponse, roll_call::responses::MyRollCallResponse};
use crate::services::internal_error;
use crate::services::roll_call::compute::load_season_result;

pub async fn my_roll_call(
    service: &PortalService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let (student, season) = match student_and_season(&storage, request).await {
        Ok(v) => v,
        Err(resp) => return Ok(resp),
    };

    let result = match load_season_result(storage.as_ref(), season).await {
        Ok(result) => result,
        Err(e) => return Ok(internal_error("Failed to compute roll call result", &e)),
    };

    // 不在本学期名单中的学员返回空结果
    let response = match result.students.into_iter().find(|s| s.student_id == student.id) {
        Some(summary) => MyRollCallResponse {
            season,
            completed: summary.completed,
            no_complete: summary.no_complete,
            absent: summary.absent,
            subjects: summary.subjects,
        },
        None => MyRollCallResponse {
            season,
            completed: 0,
            no_complete: 0,
            absent: 0,
            subjects: Vec::new(),
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Roll call result retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::absents::entities::AbsentType;
    use crate::models::absents::requests::NewAbsent;
    use crate::services::test_support::{TestEnv, body_json};

    #[actix_web::test]
    async fn test_no_attend_absence_wins() {
        let env = TestEnv::new().await;
        let student = env.student(1, 1, "rc@example.com").await;
        let subject = env.subject(1, "RC-1").await;
        env.storage
            .replace_student_registrations(student.id, 1, &[subject.id])
            .await
            .unwrap();
        env.storage
            .set_zoom_attendance(subject.id, &[student.id])
            .await
            .unwrap();
        env.storage
            .upsert_absent(NewAbsent {
                student_id: student.id,
                subject_id: subject.id,
                season: 1,
                absent_type: AbsentType::NoAttend,
                reason: None,
                note: None,
            })
            .await
            .unwrap();

        let resp = PortalService::new_lazy()
            .my_roll_call(&env.as_student(&student))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["absent"], 1);
        assert_eq!(body["data"]["subjects"][0]["status"], "absent");
    }
}
