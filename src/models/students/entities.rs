use serde::{Deserialize, Serialize};

use crate::models::CommonStatus;

// 学员实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub season: i32,
    pub numerical_order: i32,
    pub holy_name: Option<String>,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub status: CommonStatus,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    /// 展示名称：圣名 + 姓名
    pub fn display_name(&self) -> String {
        match &self.holy_name {
            Some(holy_name) if !holy_name.trim().is_empty() => {
                format!("{} {}", holy_name.trim(), self.full_name)
            }
            _ => self.full_name.clone(),
        }
    }
}
