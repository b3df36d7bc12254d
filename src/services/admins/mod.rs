pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::admins::requests::{AdminListParams, CreateAdminRequest, UpdateAdminRequest};
use crate::storage::Storage;

pub struct AdminService {
    storage: Option<Arc<dyn Storage>>,
}

impl AdminService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    // 获取管理员列表
    pub async fn list_admins(
        &self,
        query: AdminListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_admins(self, query, request).await
    }

    // 创建管理员
    pub async fn create_admin(
        &self,
        admin_data: CreateAdminRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_admin(self, admin_data, request).await
    }

    // 根据ID获取管理员
    pub async fn get_admin(&self, admin_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_admin(self, admin_id, request).await
    }

    // 更新管理员
    pub async fn update_admin(
        &self,
        admin_id: i64,
        update_data: UpdateAdminRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_admin(self, admin_id, update_data, request).await
    }

    // 删除管理员
    pub async fn delete_admin(
        &self,
        admin_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_admin(self, admin_id, request).await
    }
}
