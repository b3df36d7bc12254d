use super::entities::Document;
use crate::models::PaginatedResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub document: Document,
}

pub type DocumentListResponse = PaginatedResponse<Document>;

// 学员可见的文档
#[derive(Debug, Serialize)]
pub struct MyDocumentListResponse {
    pub season: i32,
    pub items: Vec<Document>,
}
