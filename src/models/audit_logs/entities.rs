use serde::{Deserialize, Serialize};

crate::string_enum! {
    pub enum AuditAction("audit action") {
        Create => "create",
        Update => "update",
        Delete => "delete",
    }
}

// 审计日志，只追加
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: i64,
    pub admin_id: i64,
    pub action: AuditAction,
    pub endpoint: String,
    pub description: Option<String>,
    pub season: Option<i32>,
    pub ip_address: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 待写入的审计日志
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuditLog {
    pub admin_id: i64,
    pub action: AuditAction,
    pub endpoint: String,
    pub description: Option<String>,
    pub season: Option<i32>,
    pub ip_address: Option<String>,
}
