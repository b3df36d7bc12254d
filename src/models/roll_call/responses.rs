use super::entities::{StudentRollCallSummary, StudentSubjectStatus, SubjectRollCallEntry, SubjectRollCallTally};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RollCallResultResponse {
    pub season: i32,
    pub subjects: Vec<SubjectRollCallTally>,
    pub students: Vec<StudentRollCallSummary>,
}

#[derive(Debug, Serialize)]
pub struct SubjectRollCallDetailResponse {
    pub subject_id: i64,
    pub season: i32,
    pub tally: SubjectRollCallTally,
    pub items: Vec<SubjectRollCallEntry>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceUpdateResponse {
    pub attended: u32,
    pub not_attended: u32,
    pub unmatched: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MyRollCallResponse {
    pub season: i32,
    pub completed: u32,
    pub no_complete: u32,
    pub absent: u32,
    pub subjects: Vec<StudentSubjectStatus>,
}
