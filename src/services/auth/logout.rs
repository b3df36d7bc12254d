use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use super::AuthService;
use crate::cache::ObjectCache;
use crate::middlewares::require_jwt::principal_cache_key;
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

/// 清除 refresh token cookie，并移除 access token 对应的调用方缓存
pub async fn handle_logout(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let token = request
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "));

    if let Some(token) = token
        && let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>()
    {
        cache.remove(&principal_cache_key(token)).await;
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::<()>::success_empty("Logout successful")))
}
