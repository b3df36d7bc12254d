use super::SeaOrmStorage;
use crate::entity::admins::{ActiveModel, Column, Entity as Admins};
use crate::errors::{Result, TrainHubError};
use crate::models::{
    CommonStatus, PaginationInfo,
    admins::{
        entities::Admin,
        requests::{AdminListQuery, CreateAdminRequest, UpdateAdminRequest},
        responses::AdminListResponse,
    },
    common::pagination::normalize_page,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建管理员
    pub async fn create_admin_impl(&self, req: CreateAdminRequest) -> Result<Admin> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            email: Set(req.email.trim().to_lowercase()),
            password_hash: Set(req.password),
            full_name: Set(req.full_name.trim().to_string()),
            phone: Set(req.phone),
            role: Set(req.role.to_string()),
            status: Set(CommonStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("创建管理员失败: {e}")))?;

        Ok(result.into_admin())
    }

    /// 通过 ID 获取管理员
    pub async fn get_admin_by_id_impl(&self, id: i64) -> Result<Option<Admin>> {
        let result = Admins::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询管理员失败: {e}")))?;

        Ok(result.map(|m| m.into_admin()))
    }

    /// 通过邮箱获取管理员
    pub async fn get_admin_by_email_impl(&self, email: &str) -> Result<Option<Admin>> {
        let result = Admins::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询管理员失败: {e}")))?;

        Ok(result.map(|m| m.into_admin()))
    }

    /// 分页列出管理员
    pub async fn list_admins_with_pagination_impl(
        &self,
        query: AdminListQuery,
    ) -> Result<AdminListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Admins::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Email.contains(&escaped))
                    .add(Column::FullName.contains(&escaped)),
            );
        }

        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 未指定状态时隐藏已删除记录
        select = match query.status {
            Some(status) => select.filter(Column::Status.eq(status.to_string())),
            None => select.filter(Column::Status.ne(CommonStatus::Deleted.to_string())),
        };

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询管理员总数失败: {e}")))?;

        let admins = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询管理员列表失败: {e}")))?;

        Ok(AdminListResponse {
            items: admins.into_iter().map(|m| m.into_admin()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新管理员
    pub async fn update_admin_impl(
        &self,
        id: i64,
        update: UpdateAdminRequest,
    ) -> Result<Option<Admin>> {
        if self.get_admin_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name.trim().to_string());
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("更新管理员失败: {e}")))?;

        self.get_admin_by_id_impl(id).await
    }

    /// 软删除管理员
    pub async fn delete_admin_impl(&self, id: i64) -> Result<bool> {
        let result = Admins::update_many()
            .col_expr(Column::Status, Expr::value(CommonStatus::Deleted.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.ne(CommonStatus::Deleted.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("删除管理员失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新最后登录时间
    pub async fn update_admin_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Admins::update_many()
            .col_expr(Column::LastLogin, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计管理员数量
    pub async fn count_admins_impl(&self) -> Result<u64> {
        let count = Admins::find()
            .count(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("统计管理员数量失败: {e}")))?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;

    fn admin_request(email: &str, role: UserRole) -> CreateAdminRequest {
        CreateAdminRequest {
            email: email.to_string(),
            password: "hash".to_string(),
            full_name: "Nguyễn Văn A".to_string(),
            phone: None,
            role,
        }
    }

    #[tokio::test]
    async fn test_soft_delete_hides_admin_from_list() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let a = storage
            .create_admin_impl(admin_request("a@example.com", UserRole::Admin))
            .await
            .unwrap();
        storage
            .create_admin_impl(admin_request("b@example.com", UserRole::Viewer))
            .await
            .unwrap();

        assert!(storage.delete_admin_impl(a.id).await.unwrap());
        assert!(!storage.delete_admin_impl(a.id).await.unwrap());

        let list = storage
            .list_admins_with_pagination_impl(AdminListQuery::default())
            .await
            .unwrap();
        assert_eq!(list.pagination.total, 1);
        assert_eq!(list.items[0].email, "b@example.com");

        let deleted = storage.get_admin_by_id_impl(a.id).await.unwrap().unwrap();
        assert_eq!(deleted.status, CommonStatus::Deleted);
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_insensitive() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_admin_impl(admin_request("Root@Example.com", UserRole::SuperAdmin))
            .await
            .unwrap();
        let found = storage
            .get_admin_by_email_impl("root@example.COM")
            .await
            .unwrap();
        assert_eq!(found.unwrap().role, UserRole::SuperAdmin);
        assert_eq!(storage.count_admins_impl().await.unwrap(), 1);
    }
}
