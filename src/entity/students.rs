//! 学员实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub season: i32,
    pub numerical_order: i32,
    pub holy_name: Option<String>,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
    pub status: String,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subject_registrations::Entity")]
    SubjectRegistrations,
    #[sea_orm(has_many = "super::subject_evaluations::Entity")]
    SubjectEvaluations,
    #[sea_orm(has_many = "super::absents::Entity")]
    Absents,
}

impl Related<super::subject_registrations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectRegistrations.def()
    }
}

impl Related<super::subject_evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectEvaluations.def()
    }
}

impl Related<super::absents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Absents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::CommonStatus;

        crate::models::students::entities::Student {
            id: self.id,
            season: self.season,
            numerical_order: self.numerical_order,
            holy_name: self.holy_name,
            full_name: self.full_name,
            email: self.email,
            password_hash: self.password_hash,
            phone: self.phone,
            address: self.address,
            note: self.note,
            status: self.status.parse::<CommonStatus>().unwrap_or_default(),
            last_login: self.last_login.map(super::to_datetime),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
