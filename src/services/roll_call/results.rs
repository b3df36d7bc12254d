use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RollCallService;
use super::compute::load_season_result;
use crate::models::{ApiResponse, roll_call::requests::RollCallQueryParams};
use crate::services::access::resolve_season;
use crate::services::internal_error;

pub async fn season_results(
    service: &RollCallService,
    query: RollCallQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let season = match resolve_season(&storage, query.season).await {
        Ok(season) => season,
        Err(resp) => return Ok(resp),
    };

    match load_season_result(storage.as_ref(), season).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            result,
            "Roll call result computed successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to compute roll call result", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::absents::entities::AbsentType;
    use crate::models::absents::requests::NewAbsent;
    use crate::models::auth::UserRole;
    use crate::services::test_support::{TestEnv, body_json};

    #[actix_web::test]
    async fn test_results_default_to_current_season() {
        let env = TestEnv::new().await;
        let viewer = env.admin(UserRole::Viewer).await;
        let subject = env.subject(1, "R-1").await;
        let attended = env.student(1, 1, "att@example.com").await;
        let missing = env.student(1, 2, "miss@example.com").await;
        for student in [&attended, &missing] {
            env.storage
                .replace_student_registrations(student.id, 1, &[subject.id])
                .await
                .unwrap();
        }
        env.storage
            .set_zoom_attendance(subject.id, &[attended.id])
            .await
            .unwrap();
        env.storage
            .upsert_absent(NewAbsent {
                student_id: attended.id,
                subject_id: subject.id,
                season: 1,
                absent_type: AbsentType::NoEvaluation,
                reason: None,
                note: None,
            })
            .await
            .unwrap();

        let resp = RollCallService::new_lazy()
            .results(RollCallQueryParams::default(), &env.as_admin(&viewer))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["season"], 1);
        let tally = &body["data"]["subjects"][0];
        assert_eq!(tally["completed"], 1);
        assert_eq!(tally["no_complete"], 1);
        assert_eq!(tally["absent"], 0);
    }
}
