//! 学期实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "seasons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub season: i32,
    pub name: String,
    pub academic_year: Option<String>,
    pub is_current: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_season(self) -> crate::models::seasons::entities::Season {
        crate::models::seasons::entities::Season {
            id: self.id,
            season: self.season,
            name: self.name,
            academic_year: self.academic_year,
            is_current: self.is_current,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
