use super::SeaOrmStorage;
use crate::entity::audit_logs::{ActiveModel, Column, Entity as AuditLogs};
use crate::errors::{Result, TrainHubError};
use crate::models::{
    PaginationInfo,
    audit_logs::{
        entities::{AuditLog, NewAuditLog},
        requests::AuditLogListQuery,
        responses::AuditLogListResponse,
    },
    common::pagination::normalize_page,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_audit_log_impl(&self, log: NewAuditLog) -> Result<AuditLog> {
        let model = ActiveModel {
            admin_id: Set(log.admin_id),
            action: Set(log.action.to_string()),
            endpoint: Set(log.endpoint),
            description: Set(log.description),
            season: Set(log.season),
            ip_address: Set(log.ip_address),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("写入审计日志失败: {e}")))?;

        Ok(result.into_audit_log())
    }

    pub async fn list_audit_logs_with_pagination_impl(
        &self,
        query: AuditLogListQuery,
    ) -> Result<AuditLogListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = AuditLogs::find();
        if let Some(admin_id) = query.admin_id {
            select = select.filter(Column::AdminId.eq(admin_id));
        }
        if let Some(action) = query.action {
            select = select.filter(Column::Action.eq(action.to_string()));
        }
        if let Some(season) = query.season {
            select = select.filter(Column::Season.eq(season));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询审计日志总数失败: {e}")))?;

        let logs = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询审计日志失败: {e}")))?;

        Ok(AuditLogListResponse {
            items: logs.into_iter().map(|m| m.into_audit_log()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }
}
