use super::SeaOrmStorage;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{Result, TrainHubError};
use crate::models::{
    CommonStatus, PaginationInfo,
    common::pagination::normalize_page,
    subjects::{
        entities::Subject,
        requests::{NewSubject, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建科目
    pub async fn create_subject_impl(&self, subject: NewSubject) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            season: Set(subject.season),
            code: Set(subject.code.trim().to_string()),
            title: Set(subject.title.trim().to_string()),
            lecturer_id: Set(subject.lecturer_id),
            start_at: Set(subject.start_at.map(|t| t.timestamp())),
            subdivision: Set(subject.subdivision),
            zoom_link: Set(subject.zoom_link),
            status: Set(CommonStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("创建科目失败: {e}")))?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 分页列出科目
    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Subjects::find();

        if let Some(season) = query.season {
            select = select.filter(Column::Season.eq(season));
        }
        if let Some(lecturer_id) = query.lecturer_id {
            select = select.filter(Column::LecturerId.eq(lecturer_id));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Code.contains(&escaped))
                    .add(Column::Title.contains(&escaped)),
            );
        }
        select = match query.status {
            Some(status) => select.filter(Column::Status.eq(status.to_string())),
            None => select.filter(Column::Status.ne(CommonStatus::Deleted.to_string())),
        };

        let paginator = select
            .order_by_desc(Column::Season)
            .order_by_asc(Column::StartAt)
            .order_by_asc(Column::Code)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询科目总数失败: {e}")))?;

        let subjects = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(SubjectListResponse {
            items: subjects.into_iter().map(|m| m.into_subject()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 学期内全部未删除科目
    pub async fn list_subjects_by_season_impl(&self, season: i32) -> Result<Vec<Subject>> {
        let subjects = Subjects::find()
            .filter(Column::Season.eq(season))
            .filter(Column::Status.ne(CommonStatus::Deleted.to_string()))
            .order_by_asc(Column::StartAt)
            .order_by_asc(Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询学期科目失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(code) = update.code {
            model.code = Set(code.trim().to_string());
        }
        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(lecturer_id) = update.lecturer_id {
            model.lecturer_id = Set(Some(lecturer_id));
        }
        if let Some(start_at) = update.start_at {
            model.start_at = Set(Some(start_at.timestamp()));
        }
        if let Some(subdivision) = update.subdivision {
            model.subdivision = Set(Some(subdivision));
        }
        if let Some(zoom_link) = update.zoom_link {
            model.zoom_link = Set(Some(zoom_link));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("更新科目失败: {e}")))?;

        self.get_subject_by_id_impl(id).await
    }

    /// 软删除科目
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::update_many()
            .col_expr(Column::Status, Expr::value(CommonStatus::Deleted.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.ne(CommonStatus::Deleted.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn new_subject(season: i32, code: &str) -> NewSubject {
        NewSubject {
            season,
            code: code.to_string(),
            title: format!("Môn {code}"),
            lecturer_id: None,
            start_at: None,
            subdivision: None,
            zoom_link: None,
        }
    }

    #[tokio::test]
    async fn test_code_unique_per_season() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage.create_subject_impl(new_subject(1, "TH01")).await.unwrap();
        storage.create_subject_impl(new_subject(2, "TH01")).await.unwrap();
        let err = storage
            .create_subject_impl(new_subject(1, "TH01"))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_list_by_season_skips_deleted() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let a = storage.create_subject_impl(new_subject(1, "A")).await.unwrap();
        storage.create_subject_impl(new_subject(1, "B")).await.unwrap();
        storage.delete_subject_impl(a.id).await.unwrap();

        let subjects = storage.list_subjects_by_season_impl(1).await.unwrap();
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].code, "B");
    }
}
