use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AbsentService;
use crate::models::{
    ApiResponse,
    absents::requests::{AbsentListParams, AbsentListQuery},
};
use crate::services::access::resolve_season;
use crate::services::internal_error;

pub async fn list_absents(
    service: &AbsentService,
    query: AbsentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    // 缺勤按学期列出，缺省为当前学期
    let season = match resolve_season(&storage, query.season).await {
        Ok(season) => season,
        Err(resp) => return Ok(resp),
    };

    let list_query = AbsentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        season: Some(season),
        subject_id: query.subject_id,
        student_id: query.student_id,
        absent_type: query.absent_type,
    };

    match storage.list_absents_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Absent list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve absent list", &e)),
    }
}
