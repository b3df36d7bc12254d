use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

/// JSON 请求体解析失败
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("JSON payload error on {}: {}", req.path(), err);
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "Request body is too large".to_string()
        }
        JsonPayloadError::Deserialize(e) => format!("Invalid request body: {e}"),
        _ => format!("Invalid request body: {err}"),
    };
    bad_request(message)
}

/// 查询参数解析失败
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Query payload error on {}: {}", req.path(), err);
    bad_request(format!("Invalid query parameters: {err}"))
}
