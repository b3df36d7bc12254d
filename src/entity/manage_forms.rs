//! 表单开关实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "manage_forms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub season: i32,
    pub form_type: String,
    pub status: String,
    /// JSON 对象
    pub data: String,
    pub updated_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_manage_form(self) -> crate::models::manage_forms::entities::ManageForm {
        use crate::models::manage_forms::entities::{FormStatus, FormType};

        crate::models::manage_forms::entities::ManageForm {
            id: self.id,
            season: self.season,
            form_type: self
                .form_type
                .parse::<FormType>()
                .unwrap_or(FormType::SubjectRegistration),
            // 无法识别的状态按关闭处理
            status: self.status.parse::<FormStatus>().unwrap_or(FormStatus::Closed),
            data: serde_json::from_str(&self.data).unwrap_or(serde_json::Value::Null),
            updated_by: self.updated_by,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
