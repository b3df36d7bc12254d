use serde::{Deserialize, Serialize};

// 科目报名记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRegistration {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub season: i32,
    /// 是否参加了 Zoom 课堂，由点名更新
    pub is_attend_zoom: bool,
    pub registered_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
