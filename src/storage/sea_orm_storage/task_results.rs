use super::SeaOrmStorage;
use crate::entity::task_results::{ActiveModel, Column, Entity as TaskResults};
use crate::errors::{Result, TrainHubError};
use crate::models::tasks::entities::{TaskResult, TaskStatus};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    pub async fn create_task_result_impl(&self, task_id: &str, name: &str) -> Result<TaskResult> {
        let model = ActiveModel {
            task_id: Set(task_id.to_string()),
            name: Set(name.to_string()),
            status: Set(TaskStatus::Pending.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("创建任务记录失败: {e}")))?;

        Ok(result.into_task_result())
    }

    /// 更新任务状态，结束状态写入完成时间
    pub async fn update_task_result_impl(
        &self,
        task_id: &str,
        status: TaskStatus,
        result: Option<serde_json::Value>,
        error: Option<String>,
    ) -> Result<Option<TaskResult>> {
        let Some(existing) = TaskResults::find()
            .filter(Column::TaskId.eq(task_id))
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询任务记录失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.status = Set(status.to_string());
        if let Some(result) = result {
            active.result = Set(Some(serde_json::to_string(&result)?));
        }
        if error.is_some() {
            active.error = Set(error);
        }
        if status.is_finished() {
            active.done_at = Set(Some(chrono::Utc::now().timestamp()));
        }

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("更新任务记录失败: {e}")))?;

        Ok(Some(updated.into_task_result()))
    }

    pub async fn get_task_result_impl(&self, task_id: &str) -> Result<Option<TaskResult>> {
        let result = TaskResults::find()
            .filter(Column::TaskId.eq(task_id))
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询任务记录失败: {e}")))?;

        Ok(result.map(|m| m.into_task_result()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_task_lifecycle() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let created = storage
            .create_task_result_impl("1f0c", "roll_call_report")
            .await
            .unwrap();
        assert_eq!(created.status, TaskStatus::Pending);
        assert!(created.done_at.is_none());

        let done = storage
            .update_task_result_impl(
                "1f0c",
                TaskStatus::Success,
                Some(serde_json::json!({ "rows": 3 })),
                None,
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(done.status, TaskStatus::Success);
        assert!(done.done_at.is_some());
        assert_eq!(done.result.unwrap()["rows"], 3);

        assert!(
            storage
                .update_task_result_impl("missing", TaskStatus::Failure, None, None)
                .await
                .unwrap()
                .is_none()
        );
    }
}
