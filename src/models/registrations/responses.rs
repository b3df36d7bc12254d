use super::entities::SubjectRegistration;
use crate::models::students::entities::Student;
use crate::models::subjects::entities::Subject;
use serde::Serialize;

// 科目下的报名学员
#[derive(Debug, Serialize)]
pub struct SubjectRegistrationItem {
    pub registration: SubjectRegistration,
    pub student: Student,
}

#[derive(Debug, Serialize)]
pub struct SubjectRegistrationListResponse {
    pub subject_id: i64,
    pub items: Vec<SubjectRegistrationItem>,
}

// 学员的报名科目
#[derive(Debug, Serialize)]
pub struct MyRegistrationItem {
    pub registration: SubjectRegistration,
    pub subject: Subject,
}

#[derive(Debug, Serialize)]
pub struct MyRegistrationListResponse {
    pub season: i32,
    pub items: Vec<MyRegistrationItem>,
}
