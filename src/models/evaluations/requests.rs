use serde::Deserialize;

// 学员提交评价
#[derive(Debug, Deserialize)]
pub struct SubmitEvaluationRequest {
    pub subject_id: i64,
    pub content_score: i32,
    pub lecturer_score: i32,
    pub organization_score: i32,
    pub opinion: Option<String>,
}

impl SubmitEvaluationRequest {
    pub fn validate(&self) -> Result<(), String> {
        for (name, score) in [
            ("content_score", self.content_score),
            ("lecturer_score", self.lecturer_score),
            ("organization_score", self.organization_score),
        ] {
            if !(1..=5).contains(&score) {
                return Err(format!("{name} must be between 1 and 5"));
            }
        }
        if let Some(opinion) = &self.opinion
            && opinion.chars().count() > 2000
        {
            return Err("Opinion must be at most 2000 characters".to_string());
        }
        Ok(())
    }
}

// 评价新增（存储层）
#[derive(Debug, Clone)]
pub struct NewEvaluation {
    pub student_id: i64,
    pub subject_id: i64,
    pub season: i32,
    pub content_score: i32,
    pub lecturer_score: i32,
    pub organization_score: i32,
    pub opinion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_must_be_in_range() {
        let mut req = SubmitEvaluationRequest {
            subject_id: 1,
            content_score: 5,
            lecturer_score: 1,
            organization_score: 3,
            opinion: None,
        };
        assert!(req.validate().is_ok());
        req.lecturer_score = 0;
        assert!(req.validate().unwrap_err().contains("lecturer_score"));
        req.lecturer_score = 6;
        assert!(req.validate().is_err());
    }
}
