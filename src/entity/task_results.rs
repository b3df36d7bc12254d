//! 后台任务结果实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "task_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub task_id: String,
    pub name: String,
    pub status: String,
    pub result: Option<String>,
    pub error: Option<String>,
    pub created_at: i64,
    pub done_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_task_result(self) -> crate::models::tasks::entities::TaskResult {
        use crate::models::tasks::entities::TaskStatus;

        crate::models::tasks::entities::TaskResult {
            id: self.id,
            task_id: self.task_id,
            name: self.name,
            status: self
                .status
                .parse::<TaskStatus>()
                .unwrap_or(TaskStatus::Pending),
            result: self
                .result
                .and_then(|raw| serde_json::from_str(&raw).ok()),
            error: self.error,
            created_at: super::to_datetime(self.created_at),
            done_at: self.done_at.map(super::to_datetime),
        }
    }
}
