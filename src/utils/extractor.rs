//! 路径参数提取器
//!
//! `web::Path<i64>` 解析失败时返回纯文本 404，这里统一为 400 + `ApiResponse`。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::manage_forms::entities::FormType;
use crate::models::{ApiResponse, ErrorCode};

fn invalid_path_param(name: &str, raw: &str) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid path parameter '{name}': {raw}"),
    ));
    InternalError::from_response(format!("invalid path parameter {name}"), response).into()
}

fn parse_positive_i64(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(invalid_path_param(name, raw)),
    }
}

macro_rules! define_safe_id {
    ($(#[$meta:meta])* $name:ident, $param:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_positive_i64(req, $param).map($name))
            }
        }
    };
}

define_safe_id!(
    /// 路径中的 `{id}`
    SafeIDI64,
    "id"
);
define_safe_id!(
    /// 路径中的 `{student_id}`
    SafeStudentIdI64,
    "student_id"
);

/// 路径中的 `{task_id}`，必须是 UUID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeTaskId(pub String);

impl FromRequest for SafeTaskId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("task_id").unwrap_or_default();
        ready(match uuid::Uuid::parse_str(raw) {
            Ok(id) => Ok(SafeTaskId(id.to_string())),
            Err(_) => Err(invalid_path_param("task_id", raw)),
        })
    }
}

/// 路径中的 `{season}`，学期编号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeSeason(pub i32);

impl FromRequest for SafeSeason {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("season").unwrap_or_default();
        ready(match raw.parse::<i32>() {
            Ok(season) if season > 0 => Ok(SafeSeason(season)),
            _ => Err(invalid_path_param("season", raw)),
        })
    }
}

/// 路径中的 `{form_type}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeFormType(pub FormType);

impl FromRequest for SafeFormType {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("form_type").unwrap_or_default();
        ready(
            raw.parse::<FormType>()
                .map(SafeFormType)
                .map_err(|_| invalid_path_param("form_type", raw)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test, web};

    async fn echo(id: SafeIDI64) -> HttpResponse {
        HttpResponse::Ok().body(id.0.to_string())
    }

    #[actix_web::test]
    async fn test_safe_id_accepts_positive_and_rejects_garbage() {
        let app = test::init_service(App::new().route("/items/{id}", web::get().to(echo))).await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/items/42").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "42");

        for bad in ["abc", "0", "-3"] {
            let req = test::TestRequest::get()
                .uri(&format!("/items/{bad}"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
    }

    async fn echo_form(form_type: SafeFormType) -> HttpResponse {
        HttpResponse::Ok().body(form_type.0.as_str())
    }

    #[actix_web::test]
    async fn test_form_type_path() {
        let app =
            test::init_service(App::new().route("/forms/{form_type}", web::get().to(echo_form)))
                .await;

        let req = test::TestRequest::get()
            .uri("/forms/subject_absent")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/forms/attendance").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
