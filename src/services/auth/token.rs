use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::middlewares::RequireJWT;
use crate::models::auth::responses::{PrincipalResponse, RefreshTokenResponse};
use crate::models::auth::{Principal, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

fn login_expired() -> HttpResponse {
    HttpResponse::Unauthorized()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Login expired or invalid, please login again",
        ))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let claims = match JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            return Ok(login_expired());
        }
    };
    let Some(id) = claims.principal_id() else {
        return Ok(login_expired());
    };

    // 账号被停用后不再续期
    let storage = service.get_storage(request);
    let principal = match claims.role {
        UserRole::Student => storage
            .get_student_by_id(id)
            .await
            .map(|s| s.map(Principal::Student)),
        _ => storage.get_admin_by_id(id).await.map(|a| a.map(Principal::Admin)),
    };
    let principal = match principal {
        Ok(Some(principal)) if principal.is_active() => principal,
        Ok(_) => return Ok(login_expired()),
        Err(e) => return Ok(super::super::internal_error("Token refresh failed", &e)),
    };

    match JwtUtils::generate_access_token(principal.id(), principal.role()) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access_token,
                expires_in: service.get_config().jwt.access_token_expiry * 60,
            },
            "Token refreshed successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to generate access token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Unable to generate token",
                )),
            )
        }
    }
}

pub async fn handle_me(_service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_principal(request) {
        Some(principal) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PrincipalResponse { principal },
            "Account information retrieved successfully",
        ))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::TestEnv;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;
    use actix_web::web;

    #[actix_web::test]
    async fn test_refresh_requires_active_account() {
        let env = TestEnv::new().await;
        let student = env.student(1, 1, "hv@example.com").await;
        let pair = JwtUtils::generate_token_pair(student.id, UserRole::Student, false).unwrap();

        let request = |token: &str| {
            TestRequest::default()
                .app_data(web::Data::new(env.storage.clone()))
                .cookie(Cookie::new("trainhub_refresh_token", token.to_string()))
                .to_http_request()
        };
        let service = AuthService::new_lazy();

        let resp = service.refresh_token(&request(&pair.refresh_token)).await.unwrap();
        assert_eq!(resp.status(), 200);

        // access token 不能当 refresh token 用
        let resp = service.refresh_token(&request(&pair.access_token)).await.unwrap();
        assert_eq!(resp.status(), 401);

        env.storage.delete_student(student.id).await.unwrap();
        let resp = service.refresh_token(&request(&pair.refresh_token)).await.unwrap();
        assert_eq!(resp.status(), 401);
    }
}
