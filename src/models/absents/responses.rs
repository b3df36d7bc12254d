use super::entities::Absent;
use crate::models::PaginatedResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AbsentResponse {
    pub absent: Absent,
}

pub type AbsentListResponse = PaginatedResponse<Absent>;
