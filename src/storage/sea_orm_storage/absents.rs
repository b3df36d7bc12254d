use super::SeaOrmStorage;
use crate::entity::absents::{ActiveModel, Column, Entity as Absents};
use crate::errors::{Result, TrainHubError};
use crate::models::{
    PaginationInfo,
    absents::{
        entities::Absent,
        requests::{AbsentListQuery, NewAbsent, UpdateAbsentRequest},
        responses::AbsentListResponse,
    },
    common::pagination::normalize_page,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 按 (学员, 科目) 新增或覆盖缺勤
    pub async fn upsert_absent_impl(&self, absent: NewAbsent) -> Result<Absent> {
        let now = chrono::Utc::now().timestamp();

        let existing = Absents::find()
            .filter(Column::StudentId.eq(absent.student_id))
            .filter(Column::SubjectId.eq(absent.subject_id))
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询缺勤失败: {e}")))?;

        let result = match existing {
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.absent_type = Set(absent.absent_type.to_string());
                active.reason = Set(absent.reason);
                if absent.note.is_some() {
                    active.note = Set(absent.note);
                }
                active.updated_at = Set(now);
                active
                    .update(&self.db)
                    .await
                    .map_err(|e| TrainHubError::database_operation(format!("更新缺勤失败: {e}")))?
            }
            None => ActiveModel {
                student_id: Set(absent.student_id),
                subject_id: Set(absent.subject_id),
                season: Set(absent.season),
                absent_type: Set(absent.absent_type.to_string()),
                reason: Set(absent.reason),
                note: Set(absent.note),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("创建缺勤失败: {e}")))?,
        };

        Ok(result.into_absent())
    }

    pub async fn get_absent_by_id_impl(&self, id: i64) -> Result<Option<Absent>> {
        let result = Absents::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询缺勤失败: {e}")))?;

        Ok(result.map(|m| m.into_absent()))
    }

    pub async fn list_absents_with_pagination_impl(
        &self,
        query: AbsentListQuery,
    ) -> Result<AbsentListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Absents::find();
        if let Some(season) = query.season {
            select = select.filter(Column::Season.eq(season));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(absent_type) = query.absent_type {
            select = select.filter(Column::AbsentType.eq(absent_type.to_string()));
        }

        let paginator = select
            .order_by_desc(Column::UpdatedAt)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询缺勤总数失败: {e}")))?;

        let absents = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询缺勤列表失败: {e}")))?;

        Ok(AbsentListResponse {
            items: absents.into_iter().map(|m| m.into_absent()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn list_absents_by_season_impl(&self, season: i32) -> Result<Vec<Absent>> {
        let result = Absents::find()
            .filter(Column::Season.eq(season))
            .all(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询学期缺勤失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_absent()).collect())
    }

    pub async fn update_absent_impl(
        &self,
        id: i64,
        update: UpdateAbsentRequest,
    ) -> Result<Option<Absent>> {
        if self.get_absent_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(absent_type) = update.absent_type {
            model.absent_type = Set(absent_type.to_string());
        }
        if let Some(reason) = update.reason {
            model.reason = Set(Some(reason));
        }
        if let Some(note) = update.note {
            model.note = Set(Some(note));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("更新缺勤失败: {e}")))?;

        self.get_absent_by_id_impl(id).await
    }

    pub async fn delete_absent_impl(&self, id: i64) -> Result<bool> {
        let result = Absents::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("删除缺勤失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::absents::entities::AbsentType;
    use crate::storage::sea_orm_storage::students::tests::new_student;
    use crate::storage::sea_orm_storage::subjects::tests::new_subject;

    #[tokio::test]
    async fn test_upsert_overwrites_same_pair() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let student = storage
            .create_student_impl(new_student(1, 1, "a@example.com"))
            .await
            .unwrap();
        let subject = storage.create_subject_impl(new_subject(1, "A")).await.unwrap();

        let first = storage
            .upsert_absent_impl(NewAbsent {
                student_id: student.id,
                subject_id: subject.id,
                season: 1,
                absent_type: AbsentType::NoAttend,
                reason: Some("ốm".to_string()),
                note: Some("đã duyệt".to_string()),
            })
            .await
            .unwrap();
        let second = storage
            .upsert_absent_impl(NewAbsent {
                student_id: student.id,
                subject_id: subject.id,
                season: 1,
                absent_type: AbsentType::NoEvaluation,
                reason: None,
                note: None,
            })
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.absent_type, AbsentType::NoEvaluation);
        // 学员修改不会清除管理员备注
        assert_eq!(second.note.as_deref(), Some("đã duyệt"));
        assert_eq!(storage.list_absents_by_season_impl(1).await.unwrap().len(), 1);
    }
}
