use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LecturerService;
use crate::models::{
    ApiResponse,
    audit_logs::entities::AuditAction,
    lecturers::{requests::CreateLecturerRequest, responses::LecturerResponse},
};
use crate::services::access::{current_admin, ensure_writer};
use crate::services::{bad_request, internal_error, record_audit};

pub async fn create_lecturer(
    service: &LecturerService,
    lecturer_data: CreateLecturerRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_writer(&operator) {
        return Ok(resp);
    }
    if let Err(msg) = lecturer_data.validate() {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);
    match storage.create_lecturer(lecturer_data).await {
        Ok(lecturer) => {
            record_audit(
                request,
                &operator,
                AuditAction::Create,
                format!("Created lecturer {}", lecturer.full_name),
                None,
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                LecturerResponse { lecturer },
                "Lecturer created successfully",
            )))
        }
        Err(e) => Ok(internal_error("Lecturer creation failed", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::services::test_support::TestEnv;

    fn request() -> CreateLecturerRequest {
        CreateLecturerRequest {
            title: Some("Lm.".to_string()),
            holy_name: Some("Giuse".to_string()),
            full_name: "Phạm Văn C".to_string(),
            email: Some("lecturer@example.com".to_string()),
            phone: None,
            information: None,
        }
    }

    #[actix_web::test]
    async fn test_viewer_cannot_create_lecturer() {
        let env = TestEnv::new().await;
        let viewer = env.admin(UserRole::Viewer).await;
        let admin = env.admin(UserRole::Admin).await;
        let service = LecturerService::new_lazy();

        let resp = service.create_lecturer(request(), &env.as_admin(&viewer)).await.unwrap();
        assert_eq!(resp.status(), 403);
        let resp = service.create_lecturer(request(), &env.as_admin(&admin)).await.unwrap();
        assert_eq!(resp.status(), 201);
    }
}
