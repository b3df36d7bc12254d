use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuditLogService;
use crate::models::{
    ApiResponse,
    audit_logs::requests::{AuditLogListParams, AuditLogListQuery},
};
use crate::services::internal_error;

pub async fn list_audit_logs(
    service: &AuditLogService,
    query: AuditLogListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = AuditLogListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        admin_id: query.admin_id,
        action: query.action,
        season: query.season,
    };

    match storage.list_audit_logs_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Audit log list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error("Failed to retrieve audit logs", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::models::common::PaginationQuery;
    use crate::models::lecturers::requests::CreateLecturerRequest;
    use crate::services::LecturerService;
    use crate::services::test_support::{TestEnv, body_json};

    #[actix_web::test]
    async fn test_admin_writes_are_audited() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let resp = LecturerService::new_lazy()
            .create_lecturer(
                CreateLecturerRequest {
                    title: None,
                    holy_name: None,
                    full_name: "Vũ Văn G".to_string(),
                    email: None,
                    phone: None,
                    information: None,
                },
                &env.as_admin(&admin),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);

        let service = AuditLogService::new_lazy();
        let mut total = 0;
        for _ in 0..50 {
            let resp = service
                .list_audit_logs(
                    AuditLogListParams {
                        pagination: PaginationQuery::default(),
                        admin_id: Some(admin.id),
                        action: None,
                        season: None,
                    },
                    &env.as_admin(&admin),
                )
                .await
                .unwrap();
            total = body_json(resp).await["data"]["pagination"]["total"]
                .as_i64()
                .unwrap();
            if total > 0 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        assert_eq!(total, 1);
    }
}
