use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AdminService;
use crate::models::{
    ErrorCode,
    ApiResponse,
    admins::{requests::CreateAdminRequest, responses::AdminResponse},
    audit_logs::entities::AuditAction,
};
use crate::services::access::current_admin;
use crate::services::{bad_request, internal_error, record_audit, storage_failure};
use crate::utils::password::hash_password;
use crate::utils::validate::validate_password_simple;

pub async fn create_admin(
    service: &AdminService,
    mut admin_data: CreateAdminRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = admin_data.validate() {
        return Ok(bad_request(msg));
    }
    if let Err(msg) = validate_password_simple(&admin_data.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::PasswordInvalid, msg)));
    }

    admin_data.password = match hash_password(&admin_data.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Password hashing failed", &e)),
    };

    let storage = service.get_storage(request);
    match storage.create_admin(admin_data).await {
        Ok(admin) => {
            info!("Admin {} created by {}", admin.email, operator.email);
            record_audit(
                request,
                &operator,
                AuditAction::Create,
                format!("Created admin {} ({})", admin.email, admin.role),
                None,
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(AdminResponse { admin }, "Admin created successfully")))
        }
        Err(e) => Ok(storage_failure(
            "Admin creation failed",
            &e,
            (ErrorCode::AdminAlreadyExists, "Email already exists"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::services::test_support::{TestEnv, body_json};

    fn request(email: &str, password: &str) -> CreateAdminRequest {
        CreateAdminRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: "Nguyễn Văn A".to_string(),
            phone: None,
            role: UserRole::Admin,
        }
    }

    #[actix_web::test]
    async fn test_create_admin_hashes_password_and_rejects_duplicates() {
        let env = TestEnv::new().await;
        let root = env.admin(UserRole::SuperAdmin).await;
        let service = AdminService::new_lazy();

        let resp = service
            .create_admin(request("staff@example.com", "Staff12345"), &env.as_admin(&root))
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        let body = body_json(resp).await;
        assert!(body["data"]["admin"].get("password_hash").is_none());

        let stored = env
            .storage
            .get_admin_by_email("staff@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(stored.password_hash.starts_with("$argon2id$"));

        let resp = service
            .create_admin(request("STAFF@example.com", "Staff12345"), &env.as_admin(&root))
            .await
            .unwrap();
        assert_eq!(resp.status(), 409);
    }

    #[actix_web::test]
    async fn test_create_admin_rejects_weak_password() {
        let env = TestEnv::new().await;
        let root = env.admin(UserRole::SuperAdmin).await;
        let resp = AdminService::new_lazy()
            .create_admin(request("weak@example.com", "short"), &env.as_admin(&root))
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
    }
}
