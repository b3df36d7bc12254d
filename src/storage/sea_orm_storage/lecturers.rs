use super::SeaOrmStorage;
use crate::entity::lecturers::{ActiveModel, Column, Entity as Lecturers};
use crate::errors::{Result, TrainHubError};
use crate::models::{
    CommonStatus, PaginationInfo,
    common::pagination::normalize_page,
    lecturers::{
        entities::Lecturer,
        requests::{CreateLecturerRequest, LecturerListQuery, UpdateLecturerRequest},
        responses::LecturerListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn create_lecturer_impl(&self, req: CreateLecturerRequest) -> Result<Lecturer> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            holy_name: Set(req.holy_name),
            full_name: Set(req.full_name.trim().to_string()),
            email: Set(req.email.map(|e| e.trim().to_lowercase())),
            phone: Set(req.phone),
            information: Set(req.information),
            status: Set(CommonStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("创建讲师失败: {e}")))?;

        Ok(result.into_lecturer())
    }

    pub async fn get_lecturer_by_id_impl(&self, id: i64) -> Result<Option<Lecturer>> {
        let result = Lecturers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询讲师失败: {e}")))?;

        Ok(result.map(|m| m.into_lecturer()))
    }

    pub async fn list_lecturers_with_pagination_impl(
        &self,
        query: LecturerListQuery,
    ) -> Result<LecturerListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Lecturers::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::FullName.contains(&escaped))
                    .add(Column::HolyName.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        select = match query.status {
            Some(status) => select.filter(Column::Status.eq(status.to_string())),
            None => select.filter(Column::Status.ne(CommonStatus::Deleted.to_string())),
        };

        let paginator = select
            .order_by_asc(Column::FullName)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询讲师总数失败: {e}")))?;

        let lecturers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询讲师列表失败: {e}")))?;

        Ok(LecturerListResponse {
            items: lecturers.into_iter().map(|m| m.into_lecturer()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_lecturer_impl(
        &self,
        id: i64,
        update: UpdateLecturerRequest,
    ) -> Result<Option<Lecturer>> {
        if self.get_lecturer_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(Some(title));
        }
        if let Some(holy_name) = update.holy_name {
            model.holy_name = Set(Some(holy_name));
        }
        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name.trim().to_string());
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email.trim().to_lowercase()));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(information) = update.information {
            model.information = Set(Some(information));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("更新讲师失败: {e}")))?;

        self.get_lecturer_by_id_impl(id).await
    }

    /// 软删除讲师
    pub async fn delete_lecturer_impl(&self, id: i64) -> Result<bool> {
        let result = Lecturers::update_many()
            .col_expr(Column::Status, Expr::value(CommonStatus::Deleted.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.ne(CommonStatus::Deleted.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("删除讲师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
