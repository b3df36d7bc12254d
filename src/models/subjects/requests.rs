use serde::Deserialize;

use crate::models::CommonStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_number;

#[derive(Debug, Deserialize)]
pub struct SubjectListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub season: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub lecturer_id: Option<i64>,
    pub status: Option<CommonStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SubjectListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub season: Option<i32>,
    pub lecturer_id: Option<i64>,
    pub status: Option<CommonStatus>,
    pub search: Option<String>,
}

fn validate_code(code: &str) -> Result<(), String> {
    let code = code.trim();
    if code.is_empty() {
        return Err("Subject code is required".to_string());
    }
    if code.len() > 32 {
        return Err("Subject code must be at most 32 characters".to_string());
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err("Subject code may only contain letters, digits, '-', '_' and '.'".to_string());
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Subject title is required".to_string());
    }
    if title.chars().count() > 256 {
        return Err("Subject title must be at most 256 characters".to_string());
    }
    Ok(())
}

fn validate_zoom_link(link: &str) -> Result<(), String> {
    if !link.is_empty() && !(link.starts_with("https://") || link.starts_with("http://")) {
        return Err("Zoom link must be an http(s) URL".to_string());
    }
    Ok(())
}

// 科目创建请求
#[derive(Debug, Deserialize)]
pub struct CreateSubjectRequest {
    /// 缺省为当前学期
    pub season: Option<i32>,
    pub code: String,
    pub title: String,
    pub lecturer_id: Option<i64>,
    pub start_at: Option<chrono::DateTime<chrono::Utc>>,
    pub subdivision: Option<String>,
    pub zoom_link: Option<String>,
}

impl CreateSubjectRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_code(&self.code)?;
        validate_title(&self.title)?;
        if let Some(link) = &self.zoom_link {
            validate_zoom_link(link)?;
        }
        Ok(())
    }
}

// 科目新增（存储层）
#[derive(Debug, Clone)]
pub struct NewSubject {
    pub season: i32,
    pub code: String,
    pub title: String,
    pub lecturer_id: Option<i64>,
    pub start_at: Option<chrono::DateTime<chrono::Utc>>,
    pub subdivision: Option<String>,
    pub zoom_link: Option<String>,
}

// 科目更新请求
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubjectRequest {
    pub code: Option<String>,
    pub title: Option<String>,
    pub lecturer_id: Option<i64>,
    pub start_at: Option<chrono::DateTime<chrono::Utc>>,
    pub subdivision: Option<String>,
    pub zoom_link: Option<String>,
    pub status: Option<CommonStatus>,
}

impl UpdateSubjectRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(code) = &self.code {
            validate_code(code)?;
        }
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(link) = &self.zoom_link {
            validate_zoom_link(link)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(code: &str) -> CreateSubjectRequest {
        CreateSubjectRequest {
            season: None,
            code: code.to_string(),
            title: "Kinh Thánh nhập môn".to_string(),
            lecturer_id: None,
            start_at: None,
            subdivision: None,
            zoom_link: Some("https://zoom.us/j/123".to_string()),
        }
    }

    #[test]
    fn test_subject_code_rules() {
        assert!(create_request("TH-101").validate().is_ok());
        assert!(create_request("").validate().is_err());
        assert!(create_request("TH 101").validate().is_err());
    }

    #[test]
    fn test_zoom_link_must_be_url() {
        let mut req = create_request("TH-101");
        req.zoom_link = Some("zoom.us/j/1".to_string());
        assert!(req.validate().is_err());
    }
}
