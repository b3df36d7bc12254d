use super::entities::{EvaluationSummary, SubjectEvaluation};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub evaluation: SubjectEvaluation,
}

#[derive(Debug, Serialize)]
pub struct SubjectEvaluationListResponse {
    pub subject_id: i64,
    pub summary: EvaluationSummary,
    pub items: Vec<SubjectEvaluation>,
}
