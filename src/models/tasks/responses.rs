use super::entities::{TaskResult, TaskStatus};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TaskAcceptedResponse {
    pub task_id: String,
    pub status: TaskStatus,
}

#[derive(Debug, Serialize)]
pub struct TaskResultResponse {
    pub task: TaskResult,
}
