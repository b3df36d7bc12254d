//! 科目报名实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subject_registrations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub season: i32,
    pub is_attend_zoom: bool,
    pub registered_at: i64,
    pub updated_at: i64,
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
    pub fn into_registration(self) -> crate::models::registrations::entities::SubjectRegistration {
        crate::models::registrations::entities::SubjectRegistration {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            season: self.season,
            is_attend_zoom: self.is_attend_zoom,
            registered_at: super::to_datetime(self.registered_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
