//! 管理员实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub status: String,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_admin(self) -> crate::models::admins::entities::Admin {
        use crate::models::CommonStatus;
        use crate::models::auth::UserRole;

        crate::models::admins::entities::Admin {
            id: self.id,
            email: self.email,
            password_hash: self.password_hash,
            full_name: self.full_name,
            phone: self.phone,
            // 无法识别的角色降级为只读
            role: self.role.parse::<UserRole>().unwrap_or(UserRole::Viewer),
            status: self.status.parse::<CommonStatus>().unwrap_or_default(),
            last_login: self.last_login.map(super::to_datetime),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
