use serde::{Deserialize, Serialize};

use crate::models::CommonStatus;

crate::string_enum! {
    /// 文档类型
    pub enum DocumentType("document type") {
        Common => "common",   // 全体学员可见
        Student => "student", // 指定学员
        Subject => "subject", // 指定科目的报名学员
    }
}

// 文档，仅保存外部存储的 file_id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub season: i32,
    pub name: String,
    pub file_id: String,
    pub mimetype: Option<String>,
    pub doc_type: DocumentType,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub description: Option<String>,
    pub created_by: i64,
    pub status: CommonStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
