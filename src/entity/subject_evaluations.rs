//! 科目评价实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subject_evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub season: i32,
    pub content_score: i32,
    pub lecturer_score: i32,
    pub organization_score: i32,
    pub opinion: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_evaluation(self) -> crate::models::evaluations::entities::SubjectEvaluation {
        crate::models::evaluations::entities::SubjectEvaluation {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            season: self.season,
            content_score: self.content_score,
            lecturer_score: self.lecturer_score,
            organization_score: self.organization_score,
            opinion: self.opinion,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
