use serde::Deserialize;

use super::entities::DocumentType;
use crate::models::CommonStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_number;

/// 文档类型与关联对象必须一致
pub fn validate_document_target(
    doc_type: DocumentType,
    student_id: Option<i64>,
    subject_id: Option<i64>,
) -> Result<(), String> {
    match doc_type {
        DocumentType::Common if student_id.is_some() || subject_id.is_some() => {
            Err("Common document must not reference a student or subject".to_string())
        }
        DocumentType::Student if student_id.is_none() => {
            Err("Student document requires student_id".to_string())
        }
        DocumentType::Student if subject_id.is_some() => {
            Err("Student document must not reference a subject".to_string())
        }
        DocumentType::Subject if subject_id.is_none() => {
            Err("Subject document requires subject_id".to_string())
        }
        DocumentType::Subject if student_id.is_some() => {
            Err("Subject document must not reference a student".to_string())
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Deserialize)]
pub struct DocumentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub season: Option<i32>,
    pub doc_type: Option<DocumentType>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub subject_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DocumentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub season: Option<i32>,
    pub doc_type: Option<DocumentType>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub search: Option<String>,
}

// 文档创建请求
#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    pub season: Option<i32>,
    pub name: String,
    pub file_id: String,
    pub mimetype: Option<String>,
    pub doc_type: DocumentType,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub description: Option<String>,
}

impl CreateDocumentRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Document name is required".to_string());
        }
        if self.file_id.trim().is_empty() {
            return Err("file_id is required".to_string());
        }
        validate_document_target(self.doc_type, self.student_id, self.subject_id)
    }
}

// 文档新增（存储层）
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub season: i32,
    pub name: String,
    pub file_id: String,
    pub mimetype: Option<String>,
    pub doc_type: DocumentType,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub description: Option<String>,
    pub created_by: i64,
}

// 文档更新请求，类型与关联对象需整体提交
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDocumentRequest {
    pub name: Option<String>,
    pub file_id: Option<String>,
    pub mimetype: Option<String>,
    pub doc_type: Option<DocumentType>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub description: Option<String>,
    pub status: Option<CommonStatus>,
}

impl UpdateDocumentRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("Document name is required".to_string());
        }
        if let Some(doc_type) = self.doc_type {
            validate_document_target(doc_type, self.student_id, self.subject_id)?;
        } else if self.student_id.is_some() || self.subject_id.is_some() {
            return Err("doc_type is required when changing the document target".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_target_rules() {
        assert!(validate_document_target(DocumentType::Common, None, None).is_ok());
        assert!(validate_document_target(DocumentType::Common, Some(1), None).is_err());
        assert!(validate_document_target(DocumentType::Student, Some(1), None).is_ok());
        assert!(validate_document_target(DocumentType::Student, None, None).is_err());
        assert!(validate_document_target(DocumentType::Subject, None, Some(2)).is_ok());
        assert!(validate_document_target(DocumentType::Subject, Some(1), Some(2)).is_err());
    }

    #[test]
    fn test_update_target_requires_type() {
        let req = UpdateDocumentRequest {
            student_id: Some(3),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
