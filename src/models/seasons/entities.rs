use serde::{Deserialize, Serialize};

// 学期实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub id: i64,
    /// 学期编号，例如 3 表示第三期
    pub season: i32,
    pub name: String,
    /// 学年，例如 "2025-2026"
    pub academic_year: Option<String>,
    pub is_current: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
