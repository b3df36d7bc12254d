use super::SeaOrmStorage;
use crate::entity::general_tasks::{ActiveModel, Column, Entity as GeneralTasks};
use crate::errors::{Result, TrainHubError};
use crate::models::{
    CommonStatus, PaginationInfo,
    common::pagination::normalize_page,
    general_tasks::{
        entities::GeneralTask,
        requests::{GeneralTaskListQuery, NewGeneralTask, UpdateGeneralTaskRequest},
        responses::GeneralTaskListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_general_task_impl(&self, task: NewGeneralTask) -> Result<GeneralTask> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            season: Set(task.season),
            title: Set(task.title.trim().to_string()),
            description: Set(task.description),
            role: Set(task.role.to_string()),
            task_type: Set(task.task_type.to_string()),
            start_at: Set(task.start_at.timestamp()),
            end_at: Set(task.end_at.timestamp()),
            document_ids: Set(serde_json::to_string(&task.document_ids)?),
            created_by: Set(task.created_by),
            status: Set(CommonStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("创建工作任务失败: {e}")))?;

        Ok(result.into_general_task())
    }

    pub async fn get_general_task_by_id_impl(&self, id: i64) -> Result<Option<GeneralTask>> {
        let result = GeneralTasks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询工作任务失败: {e}")))?;

        Ok(result.map(|m| m.into_general_task()))
    }

    pub async fn list_general_tasks_with_pagination_impl(
        &self,
        query: GeneralTaskListQuery,
    ) -> Result<GeneralTaskListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = GeneralTasks::find();
        if let Some(season) = query.season {
            select = select.filter(Column::Season.eq(season));
        }
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }
        if let Some(task_type) = query.task_type {
            select = select.filter(Column::TaskType.eq(task_type.to_string()));
        }
        select = match query.status {
            Some(status) => select.filter(Column::Status.eq(status.to_string())),
            None => select.filter(Column::Status.ne(CommonStatus::Deleted.to_string())),
        };

        let paginator = select
            .order_by_asc(Column::StartAt)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询工作任务总数失败: {e}")))?;

        let tasks = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询工作任务列表失败: {e}")))?;

        Ok(GeneralTaskListResponse {
            items: tasks.into_iter().map(|m| m.into_general_task()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_general_task_impl(
        &self,
        id: i64,
        update: UpdateGeneralTaskRequest,
    ) -> Result<Option<GeneralTask>> {
        if self.get_general_task_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }
        if let Some(task_type) = update.task_type {
            model.task_type = Set(task_type.to_string());
        }
        if let Some(start_at) = update.start_at {
            model.start_at = Set(start_at.timestamp());
        }
        if let Some(end_at) = update.end_at {
            model.end_at = Set(end_at.timestamp());
        }
        if let Some(document_ids) = update.document_ids {
            model.document_ids = Set(serde_json::to_string(&document_ids)?);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("更新工作任务失败: {e}")))?;

        self.get_general_task_by_id_impl(id).await
    }

    pub async fn delete_general_task_impl(&self, id: i64) -> Result<bool> {
        let result = GeneralTasks::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("删除工作任务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;
    use crate::models::general_tasks::entities::GeneralTaskType;

    #[tokio::test]
    async fn test_document_ids_roundtrip_through_json_column() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let now = chrono::Utc::now();
        let task = storage
            .create_general_task_impl(NewGeneralTask {
                season: 1,
                title: "Gửi tài liệu".to_string(),
                description: None,
                role: UserRole::Admin,
                task_type: GeneralTaskType::Annual,
                start_at: now,
                end_at: now,
                document_ids: vec![4, 9],
                created_by: 1,
            })
            .await
            .unwrap();
        assert_eq!(task.document_ids, vec![4, 9]);

        let updated = storage
            .update_general_task_impl(
                task.id,
                UpdateGeneralTaskRequest {
                    document_ids: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.document_ids.is_empty());
        assert_eq!(updated.task_type, GeneralTaskType::Annual);
    }
}
