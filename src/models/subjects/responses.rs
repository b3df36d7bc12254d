use super::entities::{StudentSubjectView, Subject, SubjectDetail};
use crate::models::PaginatedResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SubjectResponse {
    pub subject: Subject,
}

#[derive(Debug, Serialize)]
pub struct SubjectDetailResponse {
    pub subject: SubjectDetail,
}

pub type SubjectListResponse = PaginatedResponse<Subject>;

#[derive(Debug, Serialize)]
pub struct StudentSubjectListResponse {
    pub season: i32,
    pub items: Vec<StudentSubjectView>,
}
