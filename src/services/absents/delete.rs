use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AbsentService, load_absent};
use crate::models::{ApiResponse, ErrorCode, audit_logs::entities::AuditAction};
use crate::services::access::{current_admin, ensure_season_writable};
use crate::services::{internal_error, not_found, record_audit};

pub async fn delete_absent(
    service: &AbsentService,
    absent_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let absent = match load_absent(&storage, absent_id).await {
        Ok(absent) => absent,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, absent.season).await {
        return Ok(resp);
    }

    match storage.delete_absent(absent_id).await {
        Ok(true) => {
            record_audit(
                request,
                &operator,
                AuditAction::Delete,
                format!("Deleted absent record {absent_id}"),
                Some(absent.season),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Absent record deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::AbsentNotFound, "Absent record not found")),
        Err(e) => Ok(internal_error("Absent deletion failed", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::absents::entities::AbsentType;
    use crate::models::absents::requests::NewAbsent;
    use crate::models::auth::UserRole;
    use crate::services::test_support::TestEnv;

    #[actix_web::test]
    async fn test_viewer_cannot_delete_and_admin_deletes_hard() {
        let env = TestEnv::new().await;
        let viewer = env.admin(UserRole::Viewer).await;
        let admin = env.admin(UserRole::Admin).await;
        let student = env.student(1, 1, "del@example.com").await;
        let subject = env.subject(1, "D-1").await;
        let absent = env
            .storage
            .upsert_absent(NewAbsent {
                student_id: student.id,
                subject_id: subject.id,
                season: 1,
                absent_type: AbsentType::NoEvaluation,
                reason: None,
                note: None,
            })
            .await
            .unwrap();
        let service = AbsentService::new_lazy();

        let resp = service.delete_absent(absent.id, &env.as_admin(&viewer)).await.unwrap();
        assert_eq!(resp.status(), 403);
        let resp = service.delete_absent(absent.id, &env.as_admin(&admin)).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert!(env.storage.get_absent_by_id(absent.id).await.unwrap().is_none());
    }
}
