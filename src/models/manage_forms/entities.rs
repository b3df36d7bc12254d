use serde::{Deserialize, Serialize};

crate::string_enum! {
    /// 学员端提交窗口类型
    pub enum FormType("form type") {
        SubjectRegistration => "subject_registration",
        SubjectEvaluation => "subject_evaluation",
        SubjectAbsent => "subject_absent",
    }
}

crate::string_enum! {
    pub enum FormStatus("form status") {
        Open => "open",
        Closed => "closed",
    }
}

// 表单开关
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManageForm {
    pub id: i64,
    pub season: i32,
    pub form_type: FormType,
    pub status: FormStatus,
    pub data: serde_json::Value,
    pub updated_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ManageForm {
    pub fn is_open(&self) -> bool {
        self.status == FormStatus::Open
    }

    /// 评价表单可通过 `data.subject_ids` 限定科目，未配置时不限制
    pub fn allows_subject(&self, subject_id: i64) -> bool {
        match self.data.get("subject_ids").and_then(|v| v.as_array()) {
            Some(ids) => ids.iter().any(|v| v.as_i64() == Some(subject_id)),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(data: serde_json::Value) -> ManageForm {
        ManageForm {
            id: 1,
            season: 1,
            form_type: FormType::SubjectEvaluation,
            status: FormStatus::Open,
            data,
            updated_by: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_allows_subject_without_restriction() {
        assert!(form(serde_json::json!({})).allows_subject(42));
        assert!(form(serde_json::Value::Null).allows_subject(42));
    }

    #[test]
    fn test_allows_subject_with_restriction() {
        let form = form(serde_json::json!({ "subject_ids": [1, 3] }));
        assert!(form.allows_subject(3));
        assert!(!form.allows_subject(2));
    }
}
