use serde::{Deserialize, Serialize};

// 科目评价
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectEvaluation {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub season: i32,
    /// 课程内容评分 1..=5
    pub content_score: i32,
    /// 讲师评分 1..=5
    pub lecturer_score: i32,
    /// 组织安排评分 1..=5
    pub organization_score: i32,
    pub opinion: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 科目评价汇总
#[derive(Debug, Clone, Default, Serialize)]
pub struct EvaluationSummary {
    pub total: usize,
    pub content_avg: Option<f64>,
    pub lecturer_avg: Option<f64>,
    pub organization_avg: Option<f64>,
}

impl EvaluationSummary {
    pub fn from_evaluations(items: &[SubjectEvaluation]) -> Self {
        if items.is_empty() {
            return Self::default();
        }
        let n = items.len() as f64;
        let avg = |f: fn(&SubjectEvaluation) -> i32| {
            let sum: i32 = items.iter().map(f).sum();
            Some((sum as f64 / n * 100.0).round() / 100.0)
        };
        Self {
            total: items.len(),
            content_avg: avg(|e| e.content_score),
            lecturer_avg: avg(|e| e.lecturer_score),
            organization_avg: avg(|e| e.organization_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation(content: i32, lecturer: i32, organization: i32) -> SubjectEvaluation {
        SubjectEvaluation {
            id: 0,
            student_id: 1,
            subject_id: 1,
            season: 1,
            content_score: content,
            lecturer_score: lecturer,
            organization_score: organization,
            opinion: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_summary_of_empty_list() {
        let summary = EvaluationSummary::from_evaluations(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.content_avg.is_none());
    }

    #[test]
    fn test_summary_averages() {
        let summary =
            EvaluationSummary::from_evaluations(&[evaluation(5, 4, 3), evaluation(4, 4, 2)]);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.content_avg, Some(4.5));
        assert_eq!(summary.lecturer_avg, Some(4.0));
        assert_eq!(summary.organization_avg, Some(2.5));
    }
}
