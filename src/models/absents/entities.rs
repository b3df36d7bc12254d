use serde::{Deserialize, Serialize};

crate::string_enum! {
    /// 缺勤类型
    pub enum AbsentType("absent type") {
        NoAttend => "no_attend",         // 未参加课堂
        NoEvaluation => "no_evaluation", // 参加了课堂但免交评价
    }
}

// 缺勤申请
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Absent {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub season: i32,
    pub absent_type: AbsentType,
    pub reason: Option<String>,
    /// 管理员备注
    pub note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
