use super::entities::AuditLog;
use crate::models::PaginatedResponse;

pub type AuditLogListResponse = PaginatedResponse<AuditLog>;
