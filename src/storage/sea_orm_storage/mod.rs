//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod absents;
mod admins;
mod audit_logs;
mod documents;
mod evaluations;
mod general_tasks;
mod lecturers;
mod manage_forms;
mod registrations;
mod seasons;
mod students;
mod subjects;
mod task_results;

use crate::config::AppConfig;
use crate::errors::{TrainHubError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 基于已有连接创建存储并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| TrainHubError::database_operation(format!("数据库迁移失败: {e}")))?;
        Ok(Self { db })
    }

    /// 内存 SQLite，测试使用
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let db = Database::connect("sqlite::memory:")
            .await
            .map_err(|e| TrainHubError::database_connection(format!("SQLite 连接失败: {e}")))?;
        Self::from_connection(db).await
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| TrainHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| TrainHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| TrainHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(TrainHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}


// Storage trait 实现
use crate::models::{
    absents::{
        entities::Absent,
        requests::{AbsentListQuery, NewAbsent, UpdateAbsentRequest},
        responses::AbsentListResponse,
    },
    admins::{
        entities::Admin,
        requests::{AdminListQuery, CreateAdminRequest, UpdateAdminRequest},
        responses::AdminListResponse,
    },
    audit_logs::{
        entities::{AuditLog, NewAuditLog},
        requests::AuditLogListQuery,
        responses::AuditLogListResponse,
    },
    documents::{
        entities::Document,
        requests::{DocumentListQuery, NewDocument, UpdateDocumentRequest},
        responses::DocumentListResponse,
    },
    evaluations::{entities::SubjectEvaluation, requests::NewEvaluation},
    general_tasks::{
        entities::GeneralTask,
        requests::{GeneralTaskListQuery, NewGeneralTask, UpdateGeneralTaskRequest},
        responses::GeneralTaskListResponse,
    },
    lecturers::{
        entities::Lecturer,
        requests::{CreateLecturerRequest, LecturerListQuery, UpdateLecturerRequest},
        responses::LecturerListResponse,
    },
    manage_forms::entities::{FormStatus, FormType, ManageForm},
    registrations::entities::SubjectRegistration,
    seasons::{entities::Season, requests::CreateSeasonRequest},
    students::{
        entities::Student,
        requests::{NewStudent, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    subjects::{
        entities::Subject,
        requests::{NewSubject, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
    tasks::entities::{TaskResult, TaskStatus},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn list_seasons(&self) -> Result<Vec<Season>> {
        self.list_seasons_impl().await
    }

    async fn get_season(&self, season: i32) -> Result<Option<Season>> {
        self.get_season_impl(season).await
    }

    async fn get_current_season(&self) -> Result<Option<Season>> {
        self.get_current_season_impl().await
    }

    async fn create_season(&self, req: CreateSeasonRequest) -> Result<Season> {
        self.create_season_impl(req).await
    }

    async fn set_current_season(&self, season: i32) -> Result<Option<Season>> {
        self.set_current_season_impl(season).await
    }

    async fn create_admin(&self, req: CreateAdminRequest) -> Result<Admin> {
        self.create_admin_impl(req).await
    }

    async fn get_admin_by_id(&self, id: i64) -> Result<Option<Admin>> {
        self.get_admin_by_id_impl(id).await
    }

    async fn get_admin_by_email(&self, email: &str) -> Result<Option<Admin>> {
        self.get_admin_by_email_impl(email).await
    }

    async fn list_admins_with_pagination(
        &self,
        query: AdminListQuery,
    ) -> Result<AdminListResponse> {
        self.list_admins_with_pagination_impl(query).await
    }

    async fn update_admin(&self, id: i64, update: UpdateAdminRequest) -> Result<Option<Admin>> {
        self.update_admin_impl(id, update).await
    }

    async fn delete_admin(&self, id: i64) -> Result<bool> {
        self.delete_admin_impl(id).await
    }

    async fn update_admin_last_login(&self, id: i64) -> Result<bool> {
        self.update_admin_last_login_impl(id).await
    }

    async fn count_admins(&self) -> Result<u64> {
        self.count_admins_impl().await
    }

    async fn create_student(&self, student: NewStudent) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        self.get_student_by_email_impl(email).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn list_students_by_season(&self, season: i32) -> Result<Vec<Student>> {
        self.list_students_by_season_impl(season).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn update_student_last_login(&self, id: i64) -> Result<bool> {
        self.update_student_last_login_impl(id).await
    }

    async fn create_lecturer(&self, req: CreateLecturerRequest) -> Result<Lecturer> {
        self.create_lecturer_impl(req).await
    }

    async fn get_lecturer_by_id(&self, id: i64) -> Result<Option<Lecturer>> {
        self.get_lecturer_by_id_impl(id).await
    }

    async fn list_lecturers_with_pagination(
        &self,
        query: LecturerListQuery,
    ) -> Result<LecturerListResponse> {
        self.list_lecturers_with_pagination_impl(query).await
    }

    async fn update_lecturer(
        &self,
        id: i64,
        update: UpdateLecturerRequest,
    ) -> Result<Option<Lecturer>> {
        self.update_lecturer_impl(id, update).await
    }

    async fn delete_lecturer(&self, id: i64) -> Result<bool> {
        self.delete_lecturer_impl(id).await
    }

    async fn create_subject(&self, subject: NewSubject) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn list_subjects_by_season(&self, season: i32) -> Result<Vec<Subject>> {
        self.list_subjects_by_season_impl(season).await
    }

    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    async fn get_registration(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Option<SubjectRegistration>> {
        self.get_registration_impl(student_id, subject_id).await
    }

    async fn list_registrations_by_season(&self, season: i32) -> Result<Vec<SubjectRegistration>> {
        self.list_registrations_by_season_impl(season).await
    }

    async fn list_registrations_by_subject(
        &self,
        subject_id: i64,
    ) -> Result<Vec<SubjectRegistration>> {
        self.list_registrations_by_subject_impl(subject_id).await
    }

    async fn list_registrations_by_student(
        &self,
        student_id: i64,
        season: i32,
    ) -> Result<Vec<SubjectRegistration>> {
        self.list_registrations_by_student_impl(student_id, season).await
    }

    async fn replace_student_registrations(
        &self,
        student_id: i64,
        season: i32,
        subject_ids: &[i64],
    ) -> Result<Vec<SubjectRegistration>> {
        self.replace_student_registrations_impl(student_id, season, subject_ids).await
    }

    async fn set_zoom_attendance(
        &self,
        subject_id: i64,
        attended_student_ids: &[i64],
    ) -> Result<(u32, u32)> {
        self.set_zoom_attendance_impl(subject_id, attended_student_ids).await
    }

    async fn set_registration_attendance(
        &self,
        student_id: i64,
        subject_id: i64,
        is_attend_zoom: bool,
    ) -> Result<Option<SubjectRegistration>> {
        self.set_registration_attendance_impl(student_id, subject_id, is_attend_zoom).await
    }

    async fn create_evaluation(&self, evaluation: NewEvaluation) -> Result<SubjectEvaluation> {
        self.create_evaluation_impl(evaluation).await
    }

    async fn get_evaluation(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Option<SubjectEvaluation>> {
        self.get_evaluation_impl(student_id, subject_id).await
    }

    async fn list_evaluations_by_subject(&self, subject_id: i64) -> Result<Vec<SubjectEvaluation>> {
        self.list_evaluations_by_subject_impl(subject_id).await
    }

    async fn list_evaluations_by_season(&self, season: i32) -> Result<Vec<SubjectEvaluation>> {
        self.list_evaluations_by_season_impl(season).await
    }

    async fn upsert_absent(&self, absent: NewAbsent) -> Result<Absent> {
        self.upsert_absent_impl(absent).await
    }

    async fn get_absent_by_id(&self, id: i64) -> Result<Option<Absent>> {
        self.get_absent_by_id_impl(id).await
    }

    async fn list_absents_with_pagination(
        &self,
        query: AbsentListQuery,
    ) -> Result<AbsentListResponse> {
        self.list_absents_with_pagination_impl(query).await
    }

    async fn list_absents_by_season(&self, season: i32) -> Result<Vec<Absent>> {
        self.list_absents_by_season_impl(season).await
    }

    async fn update_absent(&self, id: i64, update: UpdateAbsentRequest) -> Result<Option<Absent>> {
        self.update_absent_impl(id, update).await
    }

    async fn delete_absent(&self, id: i64) -> Result<bool> {
        self.delete_absent_impl(id).await
    }

    async fn create_document(&self, document: NewDocument) -> Result<Document> {
        self.create_document_impl(document).await
    }

    async fn get_document_by_id(&self, id: i64) -> Result<Option<Document>> {
        self.get_document_by_id_impl(id).await
    }

    async fn list_documents_with_pagination(
        &self,
        query: DocumentListQuery,
    ) -> Result<DocumentListResponse> {
        self.list_documents_with_pagination_impl(query).await
    }

    async fn list_documents_for_student(
        &self,
        student_id: i64,
        season: i32,
        subject_ids: &[i64],
    ) -> Result<Vec<Document>> {
        self.list_documents_for_student_impl(student_id, season, subject_ids).await
    }

    async fn update_document(
        &self,
        id: i64,
        update: UpdateDocumentRequest,
    ) -> Result<Option<Document>> {
        self.update_document_impl(id, update).await
    }

    async fn delete_document(&self, id: i64) -> Result<bool> {
        self.delete_document_impl(id).await
    }

    async fn create_general_task(&self, task: NewGeneralTask) -> Result<GeneralTask> {
        self.create_general_task_impl(task).await
    }

    async fn get_general_task_by_id(&self, id: i64) -> Result<Option<GeneralTask>> {
        self.get_general_task_by_id_impl(id).await
    }

    async fn list_general_tasks_with_pagination(
        &self,
        query: GeneralTaskListQuery,
    ) -> Result<GeneralTaskListResponse> {
        self.list_general_tasks_with_pagination_impl(query).await
    }

    async fn update_general_task(
        &self,
        id: i64,
        update: UpdateGeneralTaskRequest,
    ) -> Result<Option<GeneralTask>> {
        self.update_general_task_impl(id, update).await
    }

    async fn delete_general_task(&self, id: i64) -> Result<bool> {
        self.delete_general_task_impl(id).await
    }

    async fn get_manage_form(
        &self,
        season: i32,
        form_type: FormType,
    ) -> Result<Option<ManageForm>> {
        self.get_manage_form_impl(season, form_type).await
    }

    async fn upsert_manage_form(
        &self,
        season: i32,
        form_type: FormType,
        status: FormStatus,
        data: serde_json::Value,
        updated_by: Option<i64>,
    ) -> Result<ManageForm> {
        self.upsert_manage_form_impl(season, form_type, status, data, updated_by).await
    }

    async fn create_audit_log(&self, log: NewAuditLog) -> Result<AuditLog> {
        self.create_audit_log_impl(log).await
    }

    async fn list_audit_logs_with_pagination(
        &self,
        query: AuditLogListQuery,
    ) -> Result<AuditLogListResponse> {
        self.list_audit_logs_with_pagination_impl(query).await
    }

    async fn create_task_result(&self, task_id: &str, name: &str) -> Result<TaskResult> {
        self.create_task_result_impl(task_id, name).await
    }

    async fn update_task_result(
        &self,
        task_id: &str,
        status: TaskStatus,
        result: Option<serde_json::Value>,
        error: Option<String>,
    ) -> Result<Option<TaskResult>> {
        self.update_task_result_impl(task_id, status, result, error).await
    }

    async fn get_task_result(&self, task_id: &str) -> Result<Option<TaskResult>> {
        self.get_task_result_impl(task_id).await
    }
}
