use serde::Deserialize;

use super::entities::AuditAction;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_number;

#[derive(Debug, Deserialize)]
pub struct AuditLogListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub admin_id: Option<i64>,
    pub action: Option<AuditAction>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub season: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct AuditLogListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub admin_id: Option<i64>,
    pub action: Option<AuditAction>,
    pub season: Option<i32>,
}
