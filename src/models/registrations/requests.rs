use serde::Deserialize;

// 学员替换本学期报名科目
#[derive(Debug, Deserialize)]
pub struct ReplaceRegistrationsRequest {
    pub subject_ids: Vec<i64>,
}

impl ReplaceRegistrationsRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.subject_ids.len() > 200 {
            return Err("Too many subjects in one registration".to_string());
        }
        if self.subject_ids.iter().any(|id| *id <= 0) {
            return Err("Subject id must be a positive number".to_string());
        }
        Ok(())
    }

    /// 去重后的科目 ID，保留提交顺序
    pub fn unique_subject_ids(&self) -> Vec<i64> {
        let mut seen = std::collections::HashSet::new();
        self.subject_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_subject_ids_keeps_order() {
        let req = ReplaceRegistrationsRequest {
            subject_ids: vec![3, 1, 3, 2, 1],
        };
        assert_eq!(req.unique_subject_ids(), vec![3, 1, 2]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_ids() {
        let req = ReplaceRegistrationsRequest {
            subject_ids: vec![1, 0],
        };
        assert!(req.validate().is_err());
    }
}
