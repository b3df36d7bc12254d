use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::absents::requests::SubmitAbsentRequest;
use crate::models::auth::UserRole;
use crate::models::evaluations::requests::SubmitEvaluationRequest;
use crate::models::registrations::requests::ReplaceRegistrationsRequest;
use crate::models::students::requests::{ChangePasswordRequest, UpdateMyProfileRequest};
use crate::services::PortalService;

// 懒加载的全局 PortalService 实例
static PORTAL_SERVICE: Lazy<PortalService> = Lazy::new(PortalService::new_lazy);

pub async fn me(req: HttpRequest) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE.me(&req).await
}

pub async fn update_profile(
    req: HttpRequest,
    profile_data: web::Json<UpdateMyProfileRequest>,
) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE
        .update_profile(profile_data.into_inner(), &req)
        .await
}

pub async fn change_password(
    req: HttpRequest,
    password_data: web::Json<ChangePasswordRequest>,
) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE
        .change_password(password_data.into_inner(), &req)
        .await
}

pub async fn list_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE.list_subjects(&req).await
}

pub async fn my_registrations(req: HttpRequest) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE.my_registrations(&req).await
}

pub async fn replace_registrations(
    req: HttpRequest,
    registration_data: web::Json<ReplaceRegistrationsRequest>,
) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE
        .replace_registrations(registration_data.into_inner(), &req)
        .await
}

pub async fn submit_evaluation(
    req: HttpRequest,
    evaluation_data: web::Json<SubmitEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE
        .submit_evaluation(evaluation_data.into_inner(), &req)
        .await
}

pub async fn submit_absent(
    req: HttpRequest,
    absent_data: web::Json<SubmitAbsentRequest>,
) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE
        .submit_absent(absent_data.into_inner(), &req)
        .await
}

pub async fn my_documents(req: HttpRequest) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE.my_documents(&req).await
}

pub async fn my_roll_call(req: HttpRequest) -> ActixResult<HttpResponse> {
    PORTAL_SERVICE.my_roll_call(&req).await
}

// 配置路由
pub fn configure_portal_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(&UserRole::Student))
                    .route("/me", web::get().to(me))
                    .route("/me", web::put().to(update_profile))
                    .route("/me/password", web::put().to(change_password))
                    .route("/subjects", web::get().to(list_subjects))
                    .route("/registrations", web::get().to(my_registrations))
                    .route("/registrations", web::put().to(replace_registrations))
                    .route("/evaluations", web::post().to(submit_evaluation))
                    .route("/absents", web::put().to(submit_absent))
                    .route("/documents", web::get().to(my_documents))
                    .route("/roll-call", web::get().to(my_roll_call)),
            ),
    );
}
