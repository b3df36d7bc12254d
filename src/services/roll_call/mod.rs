pub mod attendance;
pub mod compute;
pub mod detail;
pub mod report;
pub mod results;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::roll_call::requests::{
    AttendanceSheetRequest, RollCallQueryParams, SetAttendanceRequest,
};
use crate::storage::Storage;

pub struct RollCallService {
    storage: Option<Arc<dyn Storage>>,
}

impl RollCallService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 学期点名汇总
    pub async fn results(
        &self,
        query: RollCallQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        results::season_results(self, query, request).await
    }

    // 单科点名明细
    pub async fn subject_detail(
        &self,
        subject_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::subject_detail(self, subject_id, request).await
    }

    // 按出勤表整表更新
    pub async fn bulk_update(
        &self,
        subject_id: i64,
        sheet: AttendanceSheetRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::bulk_update(self, subject_id, sheet, request).await
    }

    // 单个学员出勤开关
    pub async fn set_attendance(
        &self,
        subject_id: i64,
        student_id: i64,
        body: SetAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::set_attendance(self, subject_id, student_id, body, request).await
    }

    // 后台生成 CSV 报表
    pub async fn export_report(
        &self,
        query: RollCallQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        report::export_report(self, query, request).await
    }
}
