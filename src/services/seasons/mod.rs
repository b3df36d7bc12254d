pub mod create;
pub mod current;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::seasons::requests::CreateSeasonRequest;
use crate::storage::Storage;

pub struct SeasonService {
    storage: Option<Arc<dyn Storage>>,
}

impl SeasonService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_seasons(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_seasons(self, request).await
    }

    pub async fn create_season(
        &self,
        season_data: CreateSeasonRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_season(self, season_data, request).await
    }

    pub async fn get_current_season(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        current::get_current_season(self, request).await
    }

    // 切换当前学期
    pub async fn set_current_season(
        &self,
        season: i32,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        current::set_current_season(self, season, request).await
    }
}
