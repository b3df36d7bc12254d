use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AuthService;
use crate::models::auth::{LoginRequest, LoginResponse, Principal};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Email or password is incorrect",
    ))
}

// 校验通过后签发令牌对，refresh token 写入 cookie
fn issue_tokens(
    service: &AuthService,
    principal: Principal,
    remember_me: bool,
) -> ActixResult<HttpResponse> {
    if !principal.is_active() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AccountDisabled,
            "Account is disabled",
        )));
    }

    let config = service.get_config();
    match JwtUtils::generate_token_pair(principal.id(), principal.role(), remember_me) {
        Ok(token_pair) => {
            info!("{} {} logged in", principal.role(), principal.id());
            let refresh_cookie =
                JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, remember_me);
            let response = LoginResponse {
                access_token: token_pair.access_token,
                expires_in: config.jwt.access_token_expiry * 60,
                principal,
                created_at: chrono::Utc::now(),
            };
            Ok(HttpResponse::Ok()
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}

pub async fn handle_admin_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let admin = match storage.get_admin_by_email(login_request.email.trim()).await {
        Ok(Some(admin)) if verify_password(&login_request.password, &admin.password_hash) => admin,
        Ok(_) => return Ok(invalid_credentials()),
        Err(e) => return Ok(super::super::internal_error("Login failed", &e)),
    };

    let _ = storage.update_admin_last_login(admin.id).await;
    issue_tokens(service, Principal::Admin(admin), login_request.remember_me)
}

pub async fn handle_student_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match storage.get_student_by_email(login_request.email.trim()).await {
        Ok(Some(student)) if verify_password(&login_request.password, &student.password_hash) => {
            student
        }
        Ok(_) => return Ok(invalid_credentials()),
        Err(e) => return Ok(super::super::internal_error("Login failed", &e)),
    };

    let _ = storage.update_student_last_login(student.id).await;
    issue_tokens(service, Principal::Student(student), login_request.remember_me)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::services::test_support::{TestEnv, body_json};

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            remember_me: false,
        }
    }

    #[actix_web::test]
    async fn test_admin_login_issues_tokens() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let service = AuthService::new_lazy();

        let resp = service
            .admin_login(login(&admin.email.to_uppercase(), "Password123"), &env.request(None))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert!(
            resp.cookies()
                .any(|c| c.name() == "trainhub_refresh_token")
        );

        let body = body_json(resp).await;
        let token = body["data"]["access_token"].as_str().unwrap();
        let claims = JwtUtils::verify_access_token(token).unwrap();
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.principal_id(), Some(admin.id));
        assert!(body["data"]["principal"]["account"].get("password_hash").is_none());
    }

    #[actix_web::test]
    async fn test_wrong_password_and_wrong_table_are_rejected() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Viewer).await;
        let student = env.student(1, 1, "hv1@example.com").await;
        let service = AuthService::new_lazy();

        let resp = service
            .admin_login(login(&admin.email, "WrongPass1"), &env.request(None))
            .await
            .unwrap();
        assert_eq!(resp.status(), 401);

        // 学员账号不能从管理员入口登录
        let resp = service
            .admin_login(login(&student.email, "Password123"), &env.request(None))
            .await
            .unwrap();
        assert_eq!(resp.status(), 401);

        let resp = service
            .student_login(login(&student.email, "Password123"), &env.request(None))
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn test_inactive_account_cannot_login() {
        let env = TestEnv::new().await;
        let student = env.student(1, 1, "hv2@example.com").await;
        env.storage.delete_student(student.id).await.unwrap();

        let resp = AuthService::new_lazy()
            .student_login(login(&student.email, "Password123"), &env.request(None))
            .await
            .unwrap();
        assert_eq!(resp.status(), 403);
    }
}
