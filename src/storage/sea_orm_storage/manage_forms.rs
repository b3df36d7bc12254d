use super::SeaOrmStorage;
use crate::entity::manage_forms::{ActiveModel, Column, Entity as ManageForms};
use crate::errors::{Result, TrainHubError};
use crate::models::manage_forms::entities::{FormStatus, FormType, ManageForm};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    pub async fn get_manage_form_impl(
        &self,
        season: i32,
        form_type: FormType,
    ) -> Result<Option<ManageForm>> {
        let result = ManageForms::find()
            .filter(Column::Season.eq(season))
            .filter(Column::FormType.eq(form_type.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询表单失败: {e}")))?;

        Ok(result.map(|m| m.into_manage_form()))
    }

    /// 按 (学期, 类型) 新增或更新表单
    pub async fn upsert_manage_form_impl(
        &self,
        season: i32,
        form_type: FormType,
        status: FormStatus,
        data: serde_json::Value,
        updated_by: Option<i64>,
    ) -> Result<ManageForm> {
        let now = chrono::Utc::now().timestamp();
        let data = serde_json::to_string(&data)?;

        let existing = ManageForms::find()
            .filter(Column::Season.eq(season))
            .filter(Column::FormType.eq(form_type.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询表单失败: {e}")))?;

        let result = match existing {
            Some(model) => {
                let mut active: ActiveModel = model.into();
                active.status = Set(status.to_string());
                active.data = Set(data);
                active.updated_by = Set(updated_by);
                active.updated_at = Set(now);
                active
                    .update(&self.db)
                    .await
                    .map_err(|e| TrainHubError::database_operation(format!("更新表单失败: {e}")))?
            }
            None => ActiveModel {
                season: Set(season),
                form_type: Set(form_type.to_string()),
                status: Set(status.to_string()),
                data: Set(data),
                updated_by: Set(updated_by),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("创建表单失败: {e}")))?,
        };

        Ok(result.into_manage_form())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_form_keeps_single_row() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        assert!(
            storage
                .get_manage_form_impl(1, FormType::SubjectEvaluation)
                .await
                .unwrap()
                .is_none()
        );

        let opened = storage
            .upsert_manage_form_impl(
                1,
                FormType::SubjectEvaluation,
                FormStatus::Open,
                serde_json::json!({ "subject_ids": [2] }),
                Some(1),
            )
            .await
            .unwrap();
        let closed = storage
            .upsert_manage_form_impl(
                1,
                FormType::SubjectEvaluation,
                FormStatus::Closed,
                serde_json::json!({}),
                Some(1),
            )
            .await
            .unwrap();

        assert_eq!(opened.id, closed.id);
        assert!(!closed.is_open());
        assert!(closed.allows_subject(5));
    }
}
