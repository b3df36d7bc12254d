use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::UserRole;
use crate::models::common::PaginationQuery;
use crate::models::roll_call::requests::{AttendanceSheetRequest, SetAttendanceRequest};
use crate::models::subjects::requests::{
    CreateSubjectRequest, SubjectListParams, UpdateSubjectRequest,
};
use crate::services::{RollCallService, SubjectService};
use crate::utils::{SafeIDI64, SafeStudentIdI64};

// 懒加载的全局 SubjectService 实例
static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);
static ROLL_CALL_SERVICE: Lazy<RollCallService> = Lazy::new(RollCallService::new_lazy);

pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<SubjectListParams>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(query.into_inner(), &req).await
}

pub async fn create_subject(
    req: HttpRequest,
    subject_data: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .create_subject(subject_data.into_inner(), &req)
        .await
}

pub async fn get_subject(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.get_subject(subject_id.0, &req).await
}

pub async fn update_subject(
    req: HttpRequest,
    subject_id: SafeIDI64,
    update_data: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .update_subject(subject_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_subject(req: HttpRequest, subject_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.delete_subject(subject_id.0, &req).await
}

pub async fn list_registrations(
    req: HttpRequest,
    subject_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_registrations(subject_id.0, &req).await
}

pub async fn list_evaluations(
    req: HttpRequest,
    subject_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_evaluations(subject_id.0, &req).await
}

pub async fn list_absents(
    req: HttpRequest,
    subject_id: SafeIDI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .list_absents(subject_id.0, query.into_inner(), &req)
        .await
}

// 科目点名明细
pub async fn roll_call_detail(
    req: HttpRequest,
    subject_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ROLL_CALL_SERVICE.subject_detail(subject_id.0, &req).await
}

// 按考勤表整体更新出勤
pub async fn bulk_update_attendance(
    req: HttpRequest,
    subject_id: SafeIDI64,
    sheet: web::Json<AttendanceSheetRequest>,
) -> ActixResult<HttpResponse> {
    ROLL_CALL_SERVICE
        .bulk_update(subject_id.0, sheet.into_inner(), &req)
        .await
}

// 单个学员出勤开关
pub async fn set_attendance(
    req: HttpRequest,
    subject_id: SafeIDI64,
    student_id: SafeStudentIdI64,
    body: web::Json<SetAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ROLL_CALL_SERVICE
        .set_attendance(subject_id.0, student_id.0, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_subject_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin/subjects")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("", web::get().to(list_subjects))
                    .route("", web::post().to(create_subject))
                    .route("/{id}", web::get().to(get_subject))
                    .route("/{id}", web::put().to(update_subject))
                    .route("/{id}", web::delete().to(delete_subject))
                    .route("/{id}/registrations", web::get().to(list_registrations))
                    .route("/{id}/evaluations", web::get().to(list_evaluations))
                    .route("/{id}/absents", web::get().to(list_absents))
                    .route("/{id}/roll-call", web::get().to(roll_call_detail))
                    .route("/{id}/roll-call", web::put().to(bulk_update_attendance))
                    .route(
                        "/{id}/roll-call/{student_id}",
                        web::patch().to(set_attendance),
                    ),
            ),
    );
}
