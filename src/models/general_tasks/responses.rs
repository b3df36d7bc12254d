use super::entities::GeneralTask;
use crate::models::PaginatedResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GeneralTaskResponse {
    pub task: GeneralTask,
}

pub type GeneralTaskListResponse = PaginatedResponse<GeneralTask>;
