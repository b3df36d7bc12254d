use super::SeaOrmStorage;
use crate::entity::documents::{ActiveModel, Column, Entity as Documents};
use crate::errors::{Result, TrainHubError};
use crate::models::{
    CommonStatus, PaginationInfo,
    common::pagination::normalize_page,
    documents::{
        entities::{Document, DocumentType},
        requests::{DocumentListQuery, NewDocument, UpdateDocumentRequest},
        responses::DocumentListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn create_document_impl(&self, document: NewDocument) -> Result<Document> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            season: Set(document.season),
            name: Set(document.name.trim().to_string()),
            file_id: Set(document.file_id.trim().to_string()),
            mimetype: Set(document.mimetype),
            doc_type: Set(document.doc_type.to_string()),
            student_id: Set(document.student_id),
            subject_id: Set(document.subject_id),
            description: Set(document.description),
            created_by: Set(document.created_by),
            status: Set(CommonStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("创建文档失败: {e}")))?;

        Ok(result.into_document())
    }

    pub async fn get_document_by_id_impl(&self, id: i64) -> Result<Option<Document>> {
        let result = Documents::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询文档失败: {e}")))?;

        Ok(result.map(|m| m.into_document()))
    }

    pub async fn list_documents_with_pagination_impl(
        &self,
        query: DocumentListQuery,
    ) -> Result<DocumentListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Documents::find()
            .filter(Column::Status.ne(CommonStatus::Deleted.to_string()));

        if let Some(season) = query.season {
            select = select.filter(Column::Season.eq(season));
        }
        if let Some(doc_type) = query.doc_type {
            select = select.filter(Column::DocType.eq(doc_type.to_string()));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Name.contains(escape_like_pattern(search.trim())));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询文档总数失败: {e}")))?;

        let documents = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询文档列表失败: {e}")))?;

        Ok(DocumentListResponse {
            items: documents.into_iter().map(|m| m.into_document()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 学员可见的文档
    pub async fn list_documents_for_student_impl(
        &self,
        student_id: i64,
        season: i32,
        subject_ids: &[i64],
    ) -> Result<Vec<Document>> {
        let mut visible = Condition::any()
            .add(Column::DocType.eq(DocumentType::Common.to_string()))
            .add(
                Condition::all()
                    .add(Column::DocType.eq(DocumentType::Student.to_string()))
                    .add(Column::StudentId.eq(student_id)),
            );
        if !subject_ids.is_empty() {
            visible = visible.add(
                Condition::all()
                    .add(Column::DocType.eq(DocumentType::Subject.to_string()))
                    .add(Column::SubjectId.is_in(subject_ids.to_vec())),
            );
        }

        let documents = Documents::find()
            .filter(Column::Season.eq(season))
            .filter(Column::Status.eq(CommonStatus::Active.to_string()))
            .filter(visible)
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询学员文档失败: {e}")))?;

        Ok(documents.into_iter().map(|m| m.into_document()).collect())
    }

    pub async fn update_document_impl(
        &self,
        id: i64,
        update: UpdateDocumentRequest,
    ) -> Result<Option<Document>> {
        if self.get_document_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(file_id) = update.file_id {
            model.file_id = Set(file_id.trim().to_string());
        }
        if let Some(mimetype) = update.mimetype {
            model.mimetype = Set(Some(mimetype));
        }
        // 类型与关联对象整体替换
        if let Some(doc_type) = update.doc_type {
            model.doc_type = Set(doc_type.to_string());
            model.student_id = Set(update.student_id);
            model.subject_id = Set(update.subject_id);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("更新文档失败: {e}")))?;

        self.get_document_by_id_impl(id).await
    }

    /// 软删除文档
    pub async fn delete_document_impl(&self, id: i64) -> Result<bool> {
        let result = Documents::update_many()
            .col_expr(Column::Status, Expr::value(CommonStatus::Deleted.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.ne(CommonStatus::Deleted.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("删除文档失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_document(
        doc_type: DocumentType,
        student_id: Option<i64>,
        subject_id: Option<i64>,
    ) -> NewDocument {
        NewDocument {
            season: 1,
            name: format!("{doc_type}.pdf"),
            file_id: "drive-file".to_string(),
            mimetype: Some("application/pdf".to_string()),
            doc_type,
            student_id,
            subject_id,
            description: None,
            created_by: 1,
        }
    }

    #[tokio::test]
    async fn test_student_visibility() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_document_impl(new_document(DocumentType::Common, None, None))
            .await
            .unwrap();
        storage
            .create_document_impl(new_document(DocumentType::Student, Some(7), None))
            .await
            .unwrap();
        storage
            .create_document_impl(new_document(DocumentType::Student, Some(8), None))
            .await
            .unwrap();
        storage
            .create_document_impl(new_document(DocumentType::Subject, None, Some(3)))
            .await
            .unwrap();
        let hidden = storage
            .create_document_impl(new_document(DocumentType::Common, None, None))
            .await
            .unwrap();
        storage.delete_document_impl(hidden.id).await.unwrap();

        let without_subjects = storage
            .list_documents_for_student_impl(7, 1, &[])
            .await
            .unwrap();
        assert_eq!(without_subjects.len(), 2);

        let with_subject = storage
            .list_documents_for_student_impl(7, 1, &[3])
            .await
            .unwrap();
        assert_eq!(with_subject.len(), 3);
    }
}
