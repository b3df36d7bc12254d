use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, ensure_lecturer_exists};
use crate::models::{
    ApiResponse, ErrorCode,
    audit_logs::entities::AuditAction,
    subjects::{
        requests::{CreateSubjectRequest, NewSubject},
        responses::SubjectResponse,
    },
};
use crate::services::access::{current_admin, ensure_season_writable, resolve_season};
use crate::services::{bad_request, record_audit, storage_failure};

pub async fn create_subject(
    service: &SubjectService,
    subject_data: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };
    if let Err(msg) = subject_data.validate() {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);
    let season = match resolve_season(&storage, subject_data.season).await {
        Ok(season) => season,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, season).await {
        return Ok(resp);
    }
    if let Some(lecturer_id) = subject_data.lecturer_id
        && let Err(resp) = ensure_lecturer_exists(&storage, lecturer_id).await
    {
        return Ok(resp);
    }

    let new_subject = NewSubject {
        season,
        code: subject_data.code.trim().to_string(),
        title: subject_data.title.trim().to_string(),
        lecturer_id: subject_data.lecturer_id,
        start_at: subject_data.start_at,
        subdivision: subject_data.subdivision,
        zoom_link: subject_data.zoom_link,
    };

    match storage.create_subject(new_subject).await {
        Ok(subject) => {
            record_audit(
                request,
                &operator,
                AuditAction::Create,
                format!("Created subject {} {}", subject.code, subject.title),
                Some(subject.season),
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                SubjectResponse { subject },
                "Subject created successfully",
            )))
        }
        Err(e) => Ok(storage_failure(
            "Subject creation failed",
            &e,
            (
                ErrorCode::SubjectAlreadyExists,
                "Subject code already exists in this season",
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::models::lecturers::requests::CreateLecturerRequest;
    use crate::services::test_support::TestEnv;

    fn request(code: &str, lecturer_id: Option<i64>) -> CreateSubjectRequest {
        CreateSubjectRequest {
            season: None,
            code: code.to_string(),
            title: "Giáo lý căn bản".to_string(),
            lecturer_id,
            start_at: None,
            subdivision: None,
            zoom_link: None,
        }
    }

    #[actix_web::test]
    async fn test_lecturer_must_exist() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let service = SubjectService::new_lazy();

        let resp = service
            .create_subject(request("GL-1", Some(404)), &env.as_admin(&admin))
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);

        let lecturer = env
            .storage
            .create_lecturer(CreateLecturerRequest {
                title: None,
                holy_name: None,
                full_name: "Đỗ Văn E".to_string(),
                email: None,
                phone: None,
                information: None,
            })
            .await
            .unwrap();
        let resp = service
            .create_subject(request("GL-1", Some(lecturer.id)), &env.as_admin(&admin))
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);

        let resp = service
            .create_subject(request("GL-1", None), &env.as_admin(&admin))
            .await
            .unwrap();
        assert_eq!(resp.status(), 409);
    }
}
