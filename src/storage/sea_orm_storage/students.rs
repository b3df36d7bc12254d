use super::SeaOrmStorage;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, TrainHubError};
use crate::models::{
    CommonStatus, PaginationInfo,
    common::pagination::normalize_page,
    students::{
        entities::Student,
        requests::{NewStudent, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建学员
    pub async fn create_student_impl(&self, student: NewStudent) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            season: Set(student.season),
            numerical_order: Set(student.numerical_order),
            holy_name: Set(student.holy_name),
            full_name: Set(student.full_name.trim().to_string()),
            email: Set(student.email.trim().to_lowercase()),
            password_hash: Set(student.password_hash),
            phone: Set(student.phone),
            address: Set(student.address),
            note: Set(student.note),
            status: Set(CommonStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("创建学员失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学员
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询学员失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过邮箱获取学员
    pub async fn get_student_by_email_impl(&self, email: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询学员失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 分页列出学员
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Students::find();

        if let Some(season) = query.season {
            select = select.filter(Column::Season.eq(season));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::FullName.contains(&escaped))
                    .add(Column::HolyName.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        select = match query.status {
            Some(status) => select.filter(Column::Status.eq(status.to_string())),
            None => select.filter(Column::Status.ne(CommonStatus::Deleted.to_string())),
        };

        select = select
            .order_by_desc(Column::Season)
            .order_by_asc(Column::NumericalOrder);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询学员总数失败: {e}")))?;

        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询学员列表失败: {e}")))?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 学期内全部未删除学员，按学号排序
    pub async fn list_students_by_season_impl(&self, season: i32) -> Result<Vec<Student>> {
        let students = Students::find()
            .filter(Column::Season.eq(season))
            .filter(Column::Status.ne(CommonStatus::Deleted.to_string()))
            .order_by_asc(Column::NumericalOrder)
            .all(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("查询学期学员失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 更新学员
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(numerical_order) = update.numerical_order {
            model.numerical_order = Set(numerical_order);
        }
        if let Some(holy_name) = update.holy_name {
            model.holy_name = Set(Some(holy_name));
        }
        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name.trim().to_string());
        }
        if let Some(email) = update.email {
            model.email = Set(email.trim().to_lowercase());
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(address) = update.address {
            model.address = Set(Some(address));
        }
        if let Some(note) = update.note {
            model.note = Set(Some(note));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(password_hash) = update.password_hash {
            model.password_hash = Set(password_hash);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("更新学员失败: {e}")))?;

        self.get_student_by_id_impl(id).await
    }

    /// 软删除学员
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::update_many()
            .col_expr(Column::Status, Expr::value(CommonStatus::Deleted.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.ne(CommonStatus::Deleted.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("删除学员失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新最后登录时间
    pub async fn update_student_last_login_impl(&self, id: i64) -> Result<bool> {
        let result = Students::update_many()
            .col_expr(Column::LastLogin, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn new_student(season: i32, order: i32, email: &str) -> NewStudent {
        NewStudent {
            season,
            numerical_order: order,
            holy_name: Some("Maria".to_string()),
            full_name: format!("Học viên {order}"),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            phone: None,
            address: None,
            note: None,
        }
    }

    #[tokio::test]
    async fn test_numerical_order_unique_per_season() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_student_impl(new_student(1, 1, "a@example.com"))
            .await
            .unwrap();
        // 不同学期可以重复学号
        storage
            .create_student_impl(new_student(2, 1, "b@example.com"))
            .await
            .unwrap();
        let err = storage
            .create_student_impl(new_student(1, 1, "c@example.com"))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_email_unique() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_student_impl(new_student(1, 1, "same@example.com"))
            .await
            .unwrap();
        let err = storage
            .create_student_impl(new_student(1, 2, "SAME@example.com"))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_list_by_season_skips_deleted() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let a = storage
            .create_student_impl(new_student(1, 2, "a@example.com"))
            .await
            .unwrap();
        storage
            .create_student_impl(new_student(1, 1, "b@example.com"))
            .await
            .unwrap();
        storage
            .create_student_impl(new_student(2, 1, "c@example.com"))
            .await
            .unwrap();
        storage.delete_student_impl(a.id).await.unwrap();

        let students = storage.list_students_by_season_impl(1).await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].email, "b@example.com");

        let page = storage
            .list_students_with_pagination_impl(StudentListQuery {
                search: Some("c@example".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 1);
    }
}
