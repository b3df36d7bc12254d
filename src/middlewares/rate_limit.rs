/*!
 * 速率限制中间件
 *
 * 按“前缀 + 调用方”计数，窗口期内超过上限返回 429。
 * 已认证请求以账号为键，其余以客户端 IP 为键。
 *
 * ```rust,ignore
 * web::scope("/api/v1/auth")
 *     .service(
 *         web::resource("/admin/login")
 *             .wrap(RateLimit::login())
 *             .route(web::post().to(admin_login)),
 *     )
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::auth::Principal;
use crate::models::{ApiResponse, ErrorCode};

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: &'static str,
    counters: Cache<String, u32>,
}

impl RateLimit {
    pub fn new(key_prefix: &'static str, max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix,
            counters: Cache::builder()
                .time_to_live(Duration::from_secs(window_secs))
                .max_capacity(100_000)
                .build(),
        }
    }

    /// 登录：5 次/分钟/IP
    pub fn login() -> Self {
        Self::new("login", 5, 60)
    }

    /// 刷新令牌：10 次/分钟/IP
    pub fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }

    /// 重置学员密码：3 次/分钟/管理员
    pub fn password_reset() -> Self {
        Self::new("password_reset", 3, 60)
    }
}

/// 客户端 IP，连接信息优先，其次 X-Forwarded-For 的第一个地址
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ip) = &connection_ip
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.clone();
    }

    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next().map(str::trim)
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.to_string();
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

/// 已认证调用方的标识，借用在返回前结束
fn extract_principal_key(req: &ServiceRequest) -> Option<String> {
    req.extensions()
        .get::<Principal>()
        .map(|principal| format!("{}:{}", principal.role(), principal.id()))
}

fn rate_limit_key(req: &ServiceRequest, prefix: &str) -> String {
    // connection_info() 首次调用会可变借用请求扩展
    let identifier = match extract_principal_key(req) {
        Some(key) => key,
        None => format!("ip:{}", extract_client_ip(req)),
    };
    format!("{prefix}:{identifier}")
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let limit = self.limit.clone();

        Box::pin(async move {
            let key = rate_limit_key(&req, limit.key_prefix);
            let current = limit.counters.get(&key).await.unwrap_or(0);

            if current >= limit.max_requests {
                warn!(
                    "Rate limit exceeded for key: {} ({}/{})",
                    key, current, limit.max_requests
                );
                return Ok(req.into_response(
                    create_rate_limit_response(limit.window_secs).map_into_right_body(),
                ));
            }

            limit.counters.insert(key, current + 1).await;
            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    #[actix_web::test]
    async fn test_requests_over_limit_are_rejected() {
        let app = test::init_service(
            App::new().service(
                web::resource("/login")
                    .wrap(RateLimit::new("test_login", 2, 60))
                    .route(web::post().to(HttpResponse::Ok)),
            ),
        )
        .await;

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/login")
                .peer_addr("10.0.0.1:5000".parse().unwrap())
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }

        let req = test::TestRequest::post()
            .uri("/login")
            .peer_addr("10.0.0.1:5000".parse().unwrap())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

        // 其他 IP 不受影响
        let req = test::TestRequest::post()
            .uri("/login")
            .peer_addr("10.0.0.2:5000".parse().unwrap())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_anonymous_key_uses_client_ip() {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/student/login")
            .peer_addr("192.168.1.20:40000".parse().unwrap())
            .to_srv_request();
        assert_eq!(rate_limit_key(&req, "login"), "login:ip:192.168.1.20");

        let req = test::TestRequest::post()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .to_srv_request();
        assert_eq!(rate_limit_key(&req, "refresh"), "refresh:ip:203.0.113.7");
    }
}
