use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ManageFormService;
use crate::models::{
    ApiResponse, ErrorCode,
    manage_forms::{
        entities::FormType, requests::ManageFormQuery, responses::ManageFormResponse,
    },
};
use crate::services::access::resolve_season;
use crate::services::{internal_error, not_found};

pub async fn get_form(
    service: &ManageFormService,
    form_type: FormType,
    query: ManageFormQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let season = match resolve_season(&storage, query.season).await {
        Ok(season) => season,
        Err(resp) => return Ok(resp),
    };

    match storage.get_manage_form(season, form_type).await {
        Ok(Some(form)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ManageFormResponse { form },
            "Form retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::FormNotFound,
            format!("Form {form_type} has not been configured for season {season}"),
        )),
        Err(e) => Ok(internal_error("Failed to retrieve form", &e)),
    }
}
