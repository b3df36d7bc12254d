use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::subject_registrations::{ActiveModel, Column, Entity as SubjectRegistrations};
use crate::errors::{Result, TrainHubError};
use crate::models::registrations::entities::SubjectRegistration;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn get_registration_impl(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Option<SubjectRegistration>> {
        let result = SubjectRegistrations::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SubjectId.eq(subject_id))
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询报名失败: {e}")))?;

        Ok(result.map(|m| m.into_registration()))
    }

    pub async fn list_registrations_by_season_impl(
        &self,
        season: i32,
    ) -> Result<Vec<SubjectRegistration>> {
        let result = SubjectRegistrations::find()
            .filter(Column::Season.eq(season))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询学期报名失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_registration()).collect())
    }

    pub async fn list_registrations_by_subject_impl(
        &self,
        subject_id: i64,
    ) -> Result<Vec<SubjectRegistration>> {
        let result = SubjectRegistrations::find()
            .filter(Column::SubjectId.eq(subject_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询科目报名失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_registration()).collect())
    }

    pub async fn list_registrations_by_student_impl(
        &self,
        student_id: i64,
        season: i32,
    ) -> Result<Vec<SubjectRegistration>> {
        let result = SubjectRegistrations::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Season.eq(season))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询学员报名失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_registration()).collect())
    }

    /// 替换学员在学期内的报名
    pub async fn replace_student_registrations_impl(
        &self,
        student_id: i64,
        season: i32,
        subject_ids: &[i64],
    ) -> Result<Vec<SubjectRegistration>> {
        let wanted: HashSet<i64> = subject_ids.iter().copied().collect();
        let existing = self
            .list_registrations_by_student_impl(student_id, season)
            .await?;
        let existing_ids: HashSet<i64> = existing.iter().map(|r| r.subject_id).collect();

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| TrainHubError::database_operation(format!("开启事务失败: {e}")))?;

        let removed: Vec<i64> = existing_ids.difference(&wanted).copied().collect();
        if !removed.is_empty() {
            SubjectRegistrations::delete_many()
                .filter(Column::StudentId.eq(student_id))
                .filter(Column::Season.eq(season))
                .filter(Column::SubjectId.is_in(removed))
                .exec(&txn)
                .await
                .map_err(|e| TrainHubError::database_operation(format!("删除报名失败: {e}")))?;
        }

        for subject_id in subject_ids {
            if existing_ids.contains(subject_id) {
                continue;
            }
            ActiveModel {
                student_id: Set(student_id),
                subject_id: Set(*subject_id),
                season: Set(season),
                is_attend_zoom: Set(false),
                registered_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("创建报名失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| TrainHubError::database_operation(format!("提交事务失败: {e}")))?;

        self.list_registrations_by_student_impl(student_id, season)
            .await
    }

    /// 整表设置科目出勤
    pub async fn set_zoom_attendance_impl(
        &self,
        subject_id: i64,
        attended_student_ids: &[i64],
    ) -> Result<(u32, u32)> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| TrainHubError::database_operation(format!("开启事务失败: {e}")))?;

        let mut reset = SubjectRegistrations::update_many()
            .col_expr(Column::IsAttendZoom, Expr::value(false))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::SubjectId.eq(subject_id));
        if !attended_student_ids.is_empty() {
            reset = reset.filter(Column::StudentId.is_not_in(attended_student_ids.to_vec()));
        }
        reset
            .exec(&txn)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("更新出勤失败: {e}")))?;

        if !attended_student_ids.is_empty() {
            SubjectRegistrations::update_many()
                .col_expr(Column::IsAttendZoom, Expr::value(true))
                .col_expr(Column::UpdatedAt, Expr::value(now))
                .filter(Column::SubjectId.eq(subject_id))
                .filter(Column::StudentId.is_in(attended_student_ids.to_vec()))
                .exec(&txn)
                .await
                .map_err(|e| TrainHubError::database_operation(format!("更新出勤失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| TrainHubError::database_operation(format!("提交事务失败: {e}")))?;

        let attended = SubjectRegistrations::find()
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::IsAttendZoom.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("统计出勤失败: {e}")))?;
        let total = SubjectRegistrations::find()
            .filter(Column::SubjectId.eq(subject_id))
            .count(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("统计报名失败: {e}")))?;

        Ok((attended as u32, (total - attended) as u32))
    }

    /// 设置单个学员出勤
    pub async fn set_registration_attendance_impl(
        &self,
        student_id: i64,
        subject_id: i64,
        is_attend_zoom: bool,
    ) -> Result<Option<SubjectRegistration>> {
        let result = SubjectRegistrations::update_many()
            .col_expr(Column::IsAttendZoom, Expr::value(is_attend_zoom))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SubjectId.eq(subject_id))
            .exec(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("更新出勤失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get_registration_impl(student_id, subject_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::students::tests::new_student;
    use crate::storage::sea_orm_storage::subjects::tests::new_subject;

    #[tokio::test]
    async fn test_replace_keeps_existing_attendance() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let student = storage
            .create_student_impl(new_student(1, 1, "a@example.com"))
            .await
            .unwrap();
        let s1 = storage.create_subject_impl(new_subject(1, "A")).await.unwrap();
        let s2 = storage.create_subject_impl(new_subject(1, "B")).await.unwrap();
        let s3 = storage.create_subject_impl(new_subject(1, "C")).await.unwrap();

        storage
            .replace_student_registrations_impl(student.id, 1, &[s1.id, s2.id])
            .await
            .unwrap();
        storage
            .set_registration_attendance_impl(student.id, s1.id, true)
            .await
            .unwrap();

        let regs = storage
            .replace_student_registrations_impl(student.id, 1, &[s1.id, s3.id])
            .await
            .unwrap();
        let ids: HashSet<i64> = regs.iter().map(|r| r.subject_id).collect();
        assert_eq!(ids, HashSet::from([s1.id, s3.id]));
        let kept = regs.iter().find(|r| r.subject_id == s1.id).unwrap();
        assert!(kept.is_attend_zoom);
    }

    #[tokio::test]
    async fn test_zoom_attendance_is_idempotent() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let subject = storage.create_subject_impl(new_subject(1, "A")).await.unwrap();
        let mut students = Vec::new();
        for order in 1..=3 {
            let s = storage
                .create_student_impl(new_student(1, order, &format!("s{order}@example.com")))
                .await
                .unwrap();
            storage
                .replace_student_registrations_impl(s.id, 1, &[subject.id])
                .await
                .unwrap();
            students.push(s);
        }

        let sheet = [students[0].id, students[2].id];
        let first = storage.set_zoom_attendance_impl(subject.id, &sheet).await.unwrap();
        let state_after_first: Vec<bool> = storage
            .list_registrations_by_subject_impl(subject.id)
            .await
            .unwrap()
            .iter()
            .map(|r| r.is_attend_zoom)
            .collect();

        let second = storage.set_zoom_attendance_impl(subject.id, &sheet).await.unwrap();
        let state_after_second: Vec<bool> = storage
            .list_registrations_by_subject_impl(subject.id)
            .await
            .unwrap()
            .iter()
            .map(|r| r.is_attend_zoom)
            .collect();

        assert_eq!(first, (2, 1));
        assert_eq!(first, second);
        assert_eq!(state_after_first, vec![true, false, true]);
        assert_eq!(state_after_first, state_after_second);

        // 空名单全部清零
        assert_eq!(
            storage.set_zoom_attendance_impl(subject.id, &[]).await.unwrap(),
            (0, 3)
        );
    }
}
