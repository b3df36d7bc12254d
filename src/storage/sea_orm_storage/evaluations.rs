use super::SeaOrmStorage;
use crate::entity::subject_evaluations::{ActiveModel, Column, Entity as SubjectEvaluations};
use crate::errors::{Result, TrainHubError};
use crate::models::evaluations::{entities::SubjectEvaluation, requests::NewEvaluation};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建评价，重复提交由唯一索引拒绝
    pub async fn create_evaluation_impl(
        &self,
        evaluation: NewEvaluation,
    ) -> Result<SubjectEvaluation> {
        let model = ActiveModel {
            student_id: Set(evaluation.student_id),
            subject_id: Set(evaluation.subject_id),
            season: Set(evaluation.season),
            content_score: Set(evaluation.content_score),
            lecturer_score: Set(evaluation.lecturer_score),
            organization_score: Set(evaluation.organization_score),
            opinion: Set(evaluation.opinion),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("创建评价失败: {e}")))?;

        Ok(result.into_evaluation())
    }

    pub async fn get_evaluation_impl(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Option<SubjectEvaluation>> {
        let result = SubjectEvaluations::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SubjectId.eq(subject_id))
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询评价失败: {e}")))?;

        Ok(result.map(|m| m.into_evaluation()))
    }

    pub async fn list_evaluations_by_subject_impl(
        &self,
        subject_id: i64,
    ) -> Result<Vec<SubjectEvaluation>> {
        let result = SubjectEvaluations::find()
            .filter(Column::SubjectId.eq(subject_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询科目评价失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_evaluation()).collect())
    }

    pub async fn list_evaluations_by_season_impl(
        &self,
        season: i32,
    ) -> Result<Vec<SubjectEvaluation>> {
        let result = SubjectEvaluations::find()
            .filter(Column::Season.eq(season))
            .all(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询学期评价失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_evaluation()).collect())
    }
}
