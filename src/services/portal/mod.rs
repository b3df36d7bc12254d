//! 学员端接口：只访问本人在当前学期的数据

pub mod absents;
pub mod documents;
pub mod evaluations;
pub mod profile;
pub mod registrations;
pub mod roll_call;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::access::{current_season, current_student};
use crate::models::absents::requests::SubmitAbsentRequest;
use crate::models::evaluations::requests::SubmitEvaluationRequest;
use crate::models::registrations::requests::ReplaceRegistrationsRequest;
use crate::models::students::entities::Student;
use crate::models::students::requests::{ChangePasswordRequest, UpdateMyProfileRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct PortalService {
    storage: Option<Arc<dyn Storage>>,
}

impl PortalService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::me(self, request).await
    }

    pub async fn update_profile(
        &self,
        profile_data: UpdateMyProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::update_profile(self, profile_data, request).await
    }

    pub async fn change_password(
        &self,
        password_data: ChangePasswordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::change_password(self, password_data, request).await
    }

    // 当前学期科目，附带本人报名标记
    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        registrations::list_subjects(self, request).await
    }

    pub async fn replace_registrations(
        &self,
        registration_data: ReplaceRegistrationsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        registrations::replace_registrations(self, registration_data, request).await
    }

    pub async fn my_registrations(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        registrations::my_registrations(self, request).await
    }

    pub async fn submit_evaluation(
        &self,
        evaluation_data: SubmitEvaluationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        evaluations::submit_evaluation(self, evaluation_data, request).await
    }

    pub async fn submit_absent(
        &self,
        absent_data: SubmitAbsentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        absents::submit_absent(self, absent_data, request).await
    }

    pub async fn my_documents(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        documents::my_documents(self, request).await
    }

    pub async fn my_roll_call(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        roll_call::my_roll_call(self, request).await
    }
}

/// 调用方学员与当前学期编号
pub(crate) async fn student_and_season(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Result<(Student, i32), HttpResponse> {
    let student = current_student(request)?;
    let season = current_season(storage).await?;
    Ok((student, season.season))
}

/// 学员提交只允许在本人所属的当前学期
pub(crate) fn ensure_enrolled(student: &Student, season: i32) -> Result<(), HttpResponse> {
    if student.season == season {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Your account does not belong to the current season",
        )))
    }
}
