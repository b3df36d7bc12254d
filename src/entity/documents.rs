//! 文档实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub season: i32,
    pub name: String,
    pub file_id: String,
    pub mimetype: Option<String>,
    pub doc_type: String,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub description: Option<String>,
    pub created_by: i64,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_document(self) -> crate::models::documents::entities::Document {
        use crate::models::documents::entities::DocumentType;

        crate::models::documents::entities::Document {
            id: self.id,
            season: self.season,
            name: self.name,
            file_id: self.file_id,
            mimetype: self.mimetype,
            doc_type: self
                .doc_type
                .parse::<DocumentType>()
                .unwrap_or(DocumentType::Common),
            student_id: self.student_id,
            subject_id: self.subject_id,
            description: self.description,
            created_by: self.created_by,
            status: self.status.parse().unwrap_or_default(),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
