use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::models::{
    ApiResponse,
    admins::requests::{AdminListParams, AdminListQuery},
};
use crate::services::internal_error;

pub async fn list_admins(
    service: &AdminService,
    query: AdminListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = AdminListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        role: query.role,
        status: query.status,
        search: query.search,
    };

    match storage.list_admins_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Admin list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve admin list", &e)),
    }
}
