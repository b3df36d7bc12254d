use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::UserRole;
use crate::models::manage_forms::requests::{ManageFormQuery, UpsertManageFormRequest};
use crate::services::ManageFormService;
use crate::utils::SafeFormType;

static MANAGE_FORM_SERVICE: Lazy<ManageFormService> = Lazy::new(ManageFormService::new_lazy);

pub async fn get_form(
    req: HttpRequest,
    form_type: SafeFormType,
    query: web::Query<ManageFormQuery>,
) -> ActixResult<HttpResponse> {
    MANAGE_FORM_SERVICE
        .get_form(form_type.0, query.into_inner(), &req)
        .await
}

pub async fn upsert_form(
    req: HttpRequest,
    form_type: SafeFormType,
    form_data: web::Json<UpsertManageFormRequest>,
) -> ActixResult<HttpResponse> {
    MANAGE_FORM_SERVICE
        .upsert_form(form_type.0, form_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_manage_form_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin/manage-forms")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("/{form_type}", web::get().to(get_form))
                    .route("/{form_type}", web::put().to(upsert_form)),
            ),
    );
}
