//! 科目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub season: i32,
    pub code: String,
    pub title: String,
    pub lecturer_id: Option<i64>,
    pub start_at: Option<i64>,
    pub subdivision: Option<String>,
    pub zoom_link: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lecturers::Entity",
        from = "Column::LecturerId",
        to = "super::lecturers::Column::Id"
    )]
    Lecturer,
    #[sea_orm(has_many = "super::subject_registrations::Entity")]
    SubjectRegistrations,
}

impl Related<super::lecturers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lecturer.def()
    }
}

impl Related<super::subject_registrations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectRegistrations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_subject(self) -> crate::models::subjects::entities::Subject {
        crate::models::subjects::entities::Subject {
            id: self.id,
            season: self.season,
            code: self.code,
            title: self.title,
            lecturer_id: self.lecturer_id,
            start_at: self.start_at.map(super::to_datetime),
            subdivision: self.subdivision,
            zoom_link: self.zoom_link,
            status: self.status.parse().unwrap_or_default(),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
