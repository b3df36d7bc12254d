use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PortalService, student_and_season};
use crate::models::{ApiResponse, documents::responses::MyDocumentListResponse};
use crate::services::internal_error;

/// 公共文档、本人文档与已报名科目的文档
pub async fn my_documents(
    service: &PortalService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let (student, season) = match student_and_season(&storage, request).await {
        Ok(v) => v,
        Err(resp) => return Ok(resp),
    };

    let subject_ids: Vec<i64> = match storage
        .list_registrations_by_student(student.id, season)
        .await
    {
        Ok(registrations) => registrations.iter().map(|r| r.subject_id).collect(),
        Err(e) => return Ok(internal_error("Failed to retrieve registrations", &e)),
    };

    match storage
        .list_documents_for_student(student.id, season, &subject_ids)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MyDocumentListResponse { season, items },
            "Document list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve documents", &e)),
    }
}
