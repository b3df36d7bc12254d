use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ManageFormService;
use crate::models::{
    ApiResponse,
    audit_logs::entities::AuditAction,
    manage_forms::{
        entities::FormType, requests::UpsertManageFormRequest, responses::ManageFormResponse,
    },
};
use crate::services::access::{current_admin, ensure_season_writable, resolve_season};
use crate::services::{bad_request, internal_error, record_audit};

pub async fn upsert_form(
    service: &ManageFormService,
    form_type: FormType,
    form_data: UpsertManageFormRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let operator = match current_admin(request) {
        Ok(admin) => admin,
        Err(resp) => return Ok(resp),
    };
    if let Err(msg) = form_data.validate(form_type) {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);
    let season = match resolve_season(&storage, form_data.season).await {
        Ok(season) => season,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = ensure_season_writable(&storage, &operator, season).await {
        return Ok(resp);
    }

    let data = if form_data.data.is_null() {
        serde_json::json!({})
    } else {
        form_data.data
    };

    match storage
        .upsert_manage_form(season, form_type, form_data.status, data, Some(operator.id))
        .await
    {
        Ok(form) => {
            info!("Form {} of season {} is now {}", form_type, season, form.status);
            record_audit(
                request,
                &operator,
                AuditAction::Update,
                format!("Set form {} to {}", form_type, form.status),
                Some(season),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ManageFormResponse { form },
                "Form updated successfully",
            )))
        }
        Err(e) => Ok(internal_error("Form update failed", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::models::manage_forms::entities::FormStatus;
    use crate::models::manage_forms::requests::ManageFormQuery;
    use crate::services::test_support::TestEnv;

    #[actix_web::test]
    async fn test_open_then_close_form() {
        let env = TestEnv::new().await;
        let admin = env.admin(UserRole::Admin).await;
        let service = ManageFormService::new_lazy();

        let resp = service
            .get_form(
                FormType::SubjectRegistration,
                ManageFormQuery { season: None },
                &env.as_admin(&admin),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);

        for status in [FormStatus::Open, FormStatus::Closed] {
            let resp = service
                .upsert_form(
                    FormType::SubjectRegistration,
                    UpsertManageFormRequest {
                        season: None,
                        status,
                        data: serde_json::Value::Null,
                    },
                    &env.as_admin(&admin),
                )
                .await
                .unwrap();
            assert_eq!(resp.status(), 200);
        }

        let form = env
            .storage
            .get_manage_form(1, FormType::SubjectRegistration)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(form.status, FormStatus::Closed);
        assert_eq!(form.updated_by, Some(admin.id));
    }
}
