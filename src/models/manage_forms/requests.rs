use serde::Deserialize;

use super::entities::{FormStatus, FormType};
use crate::models::common::pagination::deserialize_optional_number;

#[derive(Debug, Deserialize)]
pub struct ManageFormQuery {
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub season: Option<i32>,
}

// 表单开启 / 关闭
#[derive(Debug, Deserialize)]
pub struct UpsertManageFormRequest {
    pub season: Option<i32>,
    pub status: FormStatus,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl UpsertManageFormRequest {
    pub fn validate(&self, form_type: FormType) -> Result<(), String> {
        if !(self.data.is_null() || self.data.is_object()) {
            return Err("Form data must be a JSON object".to_string());
        }
        if let Some(ids) = self.data.get("subject_ids") {
            if form_type != FormType::SubjectEvaluation {
                return Err("subject_ids is only supported by the evaluation form".to_string());
            }
            let valid = ids
                .as_array()
                .is_some_and(|ids| ids.iter().all(|v| v.as_i64().is_some_and(|id| id > 0)));
            if !valid {
                return Err("subject_ids must be an array of subject ids".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(data: serde_json::Value) -> UpsertManageFormRequest {
        UpsertManageFormRequest {
            season: None,
            status: FormStatus::Open,
            data,
        }
    }

    #[test]
    fn test_subject_ids_only_on_evaluation_form() {
        let req = request(serde_json::json!({ "subject_ids": [1, 2] }));
        assert!(req.validate(FormType::SubjectEvaluation).is_ok());
        assert!(req.validate(FormType::SubjectRegistration).is_err());
    }

    #[test]
    fn test_data_must_be_object() {
        assert!(request(serde_json::json!([1])).validate(FormType::SubjectAbsent).is_err());
        assert!(request(serde_json::Value::Null).validate(FormType::SubjectAbsent).is_ok());
        let req = request(serde_json::json!({ "subject_ids": ["x"] }));
        assert!(req.validate(FormType::SubjectEvaluation).is_err());
    }
}
