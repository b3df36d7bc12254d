//! 工作任务实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "general_tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub season: i32,
    pub title: String,
    pub description: Option<String>,
    pub role: String,
    pub task_type: String,
    pub start_at: i64,
    pub end_at: i64,
    /// JSON 数组
    pub document_ids: String,
    pub created_by: i64,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_general_task(self) -> crate::models::general_tasks::entities::GeneralTask {
        use crate::models::auth::UserRole;
        use crate::models::general_tasks::entities::GeneralTaskType;

        crate::models::general_tasks::entities::GeneralTask {
            id: self.id,
            season: self.season,
            title: self.title,
            description: self.description,
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::Admin),
            task_type: self
                .task_type
                .parse::<GeneralTaskType>()
                .unwrap_or(GeneralTaskType::Common),
            start_at: super::to_datetime(self.start_at),
            end_at: super::to_datetime(self.end_at),
            document_ids: serde_json::from_str(&self.document_ids).unwrap_or_default(),
            created_by: self.created_by,
            status: self.status.parse().unwrap_or_default(),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
