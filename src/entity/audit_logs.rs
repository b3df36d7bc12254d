//! 审计日志实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub admin_id: i64,
    pub action: String,
    pub endpoint: String,
    pub description: Option<String>,
    pub season: Option<i32>,
    pub ip_address: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_audit_log(self) -> crate::models::audit_logs::entities::AuditLog {
        use crate::models::audit_logs::entities::AuditAction;

        crate::models::audit_logs::entities::AuditLog {
            id: self.id,
            admin_id: self.admin_id,
            action: self
                .action
                .parse::<AuditAction>()
                .unwrap_or(AuditAction::Update),
            endpoint: self.endpoint,
            description: self.description,
            season: self.season,
            ip_address: self.ip_address,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
