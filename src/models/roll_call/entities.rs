use serde::{Deserialize, Serialize};

use crate::models::absents::entities::AbsentType;

crate::string_enum! {
    /// 学员单科完成状态
    pub enum RollCallStatus("roll call status") {
        Completed => "completed",
        NoComplete => "no_complete",
        Absent => "absent",
    }
}

// 单科完成情况统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRollCallTally {
    pub subject_id: i64,
    pub code: String,
    pub title: String,
    pub completed: u32,
    pub no_complete: u32,
    pub absent: u32,
}

impl SubjectRollCallTally {
    pub fn record(&mut self, status: RollCallStatus) {
        match status {
            RollCallStatus::Completed => self.completed += 1,
            RollCallStatus::NoComplete => self.no_complete += 1,
            RollCallStatus::Absent => self.absent += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.completed + self.no_complete + self.absent
    }
}

// 学员单科状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSubjectStatus {
    pub subject_id: i64,
    pub status: RollCallStatus,
}

// 学员汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRollCallSummary {
    pub student_id: i64,
    pub numerical_order: i32,
    pub full_name: String,
    pub holy_name: Option<String>,
    pub email: String,
    pub completed: u32,
    pub no_complete: u32,
    pub absent: u32,
    pub subjects: Vec<StudentSubjectStatus>,
}

// 科目点名明细中的一行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRollCallEntry {
    pub student_id: i64,
    pub numerical_order: i32,
    pub full_name: String,
    pub holy_name: Option<String>,
    pub email: String,
    pub is_attend_zoom: bool,
    pub has_evaluation: bool,
    pub absent_type: Option<AbsentType>,
    pub status: RollCallStatus,
}
