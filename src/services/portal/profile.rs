use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::PortalService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{
        requests::{ChangePasswordRequest, UpdateMyProfileRequest, UpdateStudentRequest},
        responses::StudentResponse,
    },
};
use crate::services::access::current_student;
use crate::services::students::load_student;
use crate::services::{bad_request, internal_error, not_found};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password_simple;

pub async fn me(service: &PortalService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let student = match current_student(request) {
        Ok(student) => student,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match load_student(&storage, student.id).await {
        Ok(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentResponse { student },
            "Profile retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}

pub async fn update_profile(
    service: &PortalService,
    profile_data: UpdateMyProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let student = match current_student(request) {
        Ok(student) => student,
        Err(resp) => return Ok(resp),
    };
    if let Err(msg) = profile_data.validate() {
        return Ok(bad_request(msg));
    }

    // 学员只能修改圣名、电话与地址
    let update = UpdateStudentRequest {
        holy_name: profile_data.holy_name,
        phone: profile_data.phone,
        address: profile_data.address,
        ..Default::default()
    };

    let storage = service.get_storage(request);
    match storage.update_student(student.id, update).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentResponse { student },
            "Profile updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(internal_error("Profile update failed", &e)),
    }
}

pub async fn change_password(
    service: &PortalService,
    password_data: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let student = match current_student(request) {
        Ok(student) => student,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    // 缓存中的学员可能已过期，以存储为准
    let stored = match load_student(&storage, student.id).await {
        Ok(stored) => stored,
        Err(resp) => return Ok(resp),
    };
    if !verify_password(&password_data.current_password, &stored.password_hash) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Current password is incorrect",
        )));
    }
    if let Err(msg) = validate_password_simple(&password_data.new_password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::PasswordInvalid, msg)));
    }

    let password_hash = match hash_password(&password_data.new_password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Password hashing failed", &e)),
    };
    let update = UpdateStudentRequest {
        password_hash: Some(password_hash),
        ..Default::default()
    };
    match storage.update_student(student.id, update).await {
        Ok(Some(_)) => {
            info!("Student {} changed password", student.email);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Password changed successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(internal_error("Password change failed", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::TestEnv;

    #[actix_web::test]
    async fn test_change_password_checks_current_password() {
        let env = TestEnv::new().await;
        let student = env.student(1, 1, "pw@example.com").await;
        let service = PortalService::new_lazy();
        let request = |current: &str| ChangePasswordRequest {
            current_password: current.to_string(),
            new_password: "NewSecret456".to_string(),
        };

        let resp = service
            .change_password(request("WrongPassword1"), &env.as_student(&student))
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);

        let resp = service
            .change_password(request("Password123"), &env.as_student(&student))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let stored = env.storage.get_student_by_id(student.id).await.unwrap().unwrap();
        assert!(verify_password("NewSecret456", &stored.password_hash));
    }

    #[actix_web::test]
    async fn test_profile_requires_student_principal() {
        let env = TestEnv::new().await;
        let admin = env.admin(crate::models::auth::UserRole::Admin).await;
        let resp = PortalService::new_lazy().me(&env.as_admin(&admin)).await.unwrap();
        assert_eq!(resp.status(), 403);
    }
}
