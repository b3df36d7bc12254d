use super::SeaOrmStorage;
use crate::entity::seasons::{ActiveModel, Column, Entity as Seasons};
use crate::errors::{Result, TrainHubError};
use crate::models::seasons::{entities::Season, requests::CreateSeasonRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 列出全部学期
    pub async fn list_seasons_impl(&self) -> Result<Vec<Season>> {
        let seasons = Seasons::find()
            .order_by_desc(Column::Season)
            .all(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询学期列表失败: {e}")))?;

        Ok(seasons.into_iter().map(|m| m.into_season()).collect())
    }

    /// 通过学期编号获取学期
    pub async fn get_season_impl(&self, season: i32) -> Result<Option<Season>> {
        let result = Seasons::find()
            .filter(Column::Season.eq(season))
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询学期失败: {e}")))?;

        Ok(result.map(|m| m.into_season()))
    }

    /// 获取当前学期
    pub async fn get_current_season_impl(&self) -> Result<Option<Season>> {
        let result = Seasons::find()
            .filter(Column::IsCurrent.eq(true))
            .order_by_desc(Column::UpdatedAt)
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询当前学期失败: {e}")))?;

        Ok(result.map(|m| m.into_season()))
    }

    /// 创建学期
    pub async fn create_season_impl(&self, req: CreateSeasonRequest) -> Result<Season> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            season: Set(req.season),
            name: Set(req.name.trim().to_string()),
            academic_year: Set(req.academic_year),
            is_current: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("创建学期失败: {e}")))?;

        if req.set_current {
            return self
                .set_current_season_impl(created.season)
                .await?
                .ok_or_else(|| TrainHubError::not_found(format!("Season {}", created.season)));
        }

        Ok(created.into_season())
    }

    /// 设置当前学期
    ///
    /// 在同一事务中先清除全部标记再设置目标学期，保证只有一个当前学期。
    pub async fn set_current_season_impl(&self, season: i32) -> Result<Option<Season>> {
        if self.get_season_impl(season).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| TrainHubError::database_operation(format!("开启事务失败: {e}")))?;

        Seasons::update_many()
            .col_expr(Column::IsCurrent, Expr::value(false))
            .filter(Column::IsCurrent.eq(true))
            .exec(&txn)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("清除当前学期失败: {e}")))?;

        Seasons::update_many()
            .col_expr(Column::IsCurrent, Expr::value(true))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Season.eq(season))
            .exec(&txn)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("设置当前学期失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| TrainHubError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_season_impl(season).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn season_request(season: i32, set_current: bool) -> CreateSeasonRequest {
        CreateSeasonRequest {
            season,
            name: format!("Khóa {season}"),
            academic_year: Some("2025-2026".to_string()),
            set_current,
        }
    }

    #[tokio::test]
    async fn test_only_one_current_season() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage.create_season_impl(season_request(1, true)).await.unwrap();
        storage.create_season_impl(season_request(2, false)).await.unwrap();

        assert_eq!(
            storage.get_current_season_impl().await.unwrap().unwrap().season,
            1
        );

        storage.set_current_season_impl(2).await.unwrap().unwrap();
        let current: Vec<_> = storage
            .list_seasons_impl()
            .await
            .unwrap()
            .into_iter()
            .filter(|s| s.is_current)
            .collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].season, 2);
    }

    #[tokio::test]
    async fn test_duplicate_season_is_unique_violation() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage.create_season_impl(season_request(3, false)).await.unwrap();
        let err = storage
            .create_season_impl(season_request(3, false))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_set_current_unknown_season() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        assert!(storage.set_current_season_impl(9).await.unwrap().is_none());
    }
}
