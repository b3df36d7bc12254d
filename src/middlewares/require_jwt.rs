/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <access_token>`，按令牌中的角色加载管理员或学员，
 * 并把 `Principal` 写入请求扩展。账号不存在或非 active 状态时返回 401。
 *
 * ```rust,ignore
 * web::scope("/api/v1/admin")
 *     .wrap(RequireRole::new_any(UserRole::admin_roles()))
 *     .wrap(RequireJWT)
 * ```
 *
 * 处理函数中通过 `RequireJWT::extract_principal(&req)` 取得调用方。
 * 调用方信息按令牌缓存（`cache.default_ttl` 秒）。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;
use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::auth::{Principal, UserRole};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

pub(crate) fn principal_cache_key(token: &str) -> String {
    format!("principal:{token}")
}

// 校验 access token 并加载调用方
async fn authenticate(req: &ServiceRequest) -> Result<Principal, String> {
    let token = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());

    let cache_key = principal_cache_key(token);
    if let Some(cache) = &cache
        && let CacheResult::Found(principal) = cache.get_json::<Principal>(&cache_key).await
    {
        return Ok(principal);
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| "Storage is not configured".to_string())?;

    let id = claims
        .principal_id()
        .ok_or_else(|| "Invalid subject in JWT".to_string())?;

    let principal = match claims.role {
        UserRole::Student => storage
            .get_student_by_id(id)
            .await
            .map_err(|_| "Failed to retrieve account".to_string())?
            .map(Principal::Student),
        _ => storage
            .get_admin_by_id(id)
            .await
            .map_err(|_| "Failed to retrieve account".to_string())?
            .map(Principal::Admin),
    }
    .ok_or_else(|| "Account not found".to_string())?;

    if !principal.is_active() {
        return Err("Account is not active".to_string());
    }

    if let Some(cache) = &cache {
        cache
            .insert_json(cache_key, &principal, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(principal)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match authenticate(&req).await {
                Ok(principal) => {
                    debug!(
                        "JWT authentication successful for {} {}",
                        principal.role(),
                        principal.id()
                    );
                    req.extensions_mut().insert(principal);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 从请求扩展中提取调用方，需在应用了 RequireJWT 的路由中使用
    pub fn extract_principal(req: &actix_web::HttpRequest) -> Option<Principal> {
        req.extensions().get::<Principal>().cloned()
    }
}
