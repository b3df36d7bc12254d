use super::entities::Lecturer;
use crate::models::PaginatedResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LecturerResponse {
    pub lecturer: Lecturer,
}

pub type LecturerListResponse = PaginatedResponse<Lecturer>;
