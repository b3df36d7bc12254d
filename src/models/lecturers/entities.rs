use serde::{Deserialize, Serialize};

use crate::models::CommonStatus;

// 讲师实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lecturer {
    pub id: i64,
    pub title: Option<String>,
    pub holy_name: Option<String>,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub information: Option<String>,
    pub status: CommonStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
