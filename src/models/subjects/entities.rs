use serde::{Deserialize, Serialize};

use crate::models::CommonStatus;
use crate::models::lecturers::entities::Lecturer;

// 科目实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub season: i32,
    /// 科目编号，同一学期内唯一
    pub code: String,
    pub title: String,
    pub lecturer_id: Option<i64>,
    pub start_at: Option<chrono::DateTime<chrono::Utc>>,
    /// 分区 / 授课小组
    pub subdivision: Option<String>,
    pub zoom_link: Option<String>,
    pub status: CommonStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 科目详情（附带讲师）
#[derive(Debug, Clone, Serialize)]
pub struct SubjectDetail {
    #[serde(flatten)]
    pub subject: Subject,
    pub lecturer: Option<Lecturer>,
}

// 学员端的科目视图
#[derive(Debug, Clone, Serialize)]
pub struct StudentSubjectView {
    #[serde(flatten)]
    pub subject: Subject,
    pub lecturer: Option<Lecturer>,
    pub registered: bool,
}
