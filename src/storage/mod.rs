use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学期管理方法
    // 列出全部学期（按学期编号倒序）
    async fn list_seasons(&self) -> Result<Vec<Season>>;
    // 通过学期编号获取学期
    async fn get_season(&self, season: i32) -> Result<Option<Season>>;
    // 获取当前学期
    async fn get_current_season(&self) -> Result<Option<Season>>;
    // 创建学期
    async fn create_season(&self, req: CreateSeasonRequest) -> Result<Season>;
    // 设置当前学期，其余学期全部取消
    async fn set_current_season(&self, season: i32) -> Result<Option<Season>>;

    /// 管理员管理方法
    // 创建管理员（password 字段已是哈希）
    async fn create_admin(&self, req: CreateAdminRequest) -> Result<Admin>;
    async fn get_admin_by_id(&self, id: i64) -> Result<Option<Admin>>;
    async fn get_admin_by_email(&self, email: &str) -> Result<Option<Admin>>;
    async fn list_admins_with_pagination(&self, query: AdminListQuery)
    -> Result<AdminListResponse>;
    // 更新管理员（password 字段已是哈希）
    async fn update_admin(&self, id: i64, update: UpdateAdminRequest) -> Result<Option<Admin>>;
    // 软删除管理员
    async fn delete_admin(&self, id: i64) -> Result<bool>;
    async fn update_admin_last_login(&self, id: i64) -> Result<bool>;
    async fn count_admins(&self) -> Result<u64>;

    /// 学员管理方法
    async fn create_student(&self, student: NewStudent) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 学期内全部未删除学员
    async fn list_students_by_season(&self, season: i32) -> Result<Vec<Student>>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 软删除学员
    async fn delete_student(&self, id: i64) -> Result<bool>;
    async fn update_student_last_login(&self, id: i64) -> Result<bool>;

    /// 讲师管理方法
    async fn create_lecturer(&self, req: CreateLecturerRequest) -> Result<Lecturer>;
    async fn get_lecturer_by_id(&self, id: i64) -> Result<Option<Lecturer>>;
    async fn list_lecturers_with_pagination(
        &self,
        query: LecturerListQuery,
    ) -> Result<LecturerListResponse>;
    async fn update_lecturer(
        &self,
        id: i64,
        update: UpdateLecturerRequest,
    ) -> Result<Option<Lecturer>>;
    async fn delete_lecturer(&self, id: i64) -> Result<bool>;

    /// 科目管理方法
    async fn create_subject(&self, subject: NewSubject) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse>;
    // 学期内全部未删除科目
    async fn list_subjects_by_season(&self, season: i32) -> Result<Vec<Subject>>;
    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 报名与点名方法
    async fn get_registration(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Option<SubjectRegistration>>;
    async fn list_registrations_by_season(&self, season: i32) -> Result<Vec<SubjectRegistration>>;
    async fn list_registrations_by_subject(
        &self,
        subject_id: i64,
    ) -> Result<Vec<SubjectRegistration>>;
    async fn list_registrations_by_student(
        &self,
        student_id: i64,
        season: i32,
    ) -> Result<Vec<SubjectRegistration>>;
    // 用给定科目集合替换学员在该学期的报名，已有报名保留出勤状态
    async fn replace_student_registrations(
        &self,
        student_id: i64,
        season: i32,
        subject_ids: &[i64],
    ) -> Result<Vec<SubjectRegistration>>;
    // 整表设置科目出勤：名单内为 true，其余为 false，返回 (出勤, 未出勤)
    async fn set_zoom_attendance(
        &self,
        subject_id: i64,
        attended_student_ids: &[i64],
    ) -> Result<(u32, u32)>;
    // 设置单个学员出勤
    async fn set_registration_attendance(
        &self,
        student_id: i64,
        subject_id: i64,
        is_attend_zoom: bool,
    ) -> Result<Option<SubjectRegistration>>;

    /// 评价方法
    async fn create_evaluation(&self, evaluation: NewEvaluation) -> Result<SubjectEvaluation>;
    async fn get_evaluation(
        &self,
        student_id: i64,
        subject_id: i64,
    ) -> Result<Option<SubjectEvaluation>>;
    async fn list_evaluations_by_subject(&self, subject_id: i64)
    -> Result<Vec<SubjectEvaluation>>;
    async fn list_evaluations_by_season(&self, season: i32) -> Result<Vec<SubjectEvaluation>>;

    /// 缺勤方法
    // 按 (学员, 科目) 新增或覆盖
    async fn upsert_absent(&self, absent: NewAbsent) -> Result<Absent>;
    async fn get_absent_by_id(&self, id: i64) -> Result<Option<Absent>>;
    async fn list_absents_with_pagination(
        &self,
        query: AbsentListQuery,
    ) -> Result<AbsentListResponse>;
    async fn list_absents_by_season(&self, season: i32) -> Result<Vec<Absent>>;
    async fn update_absent(&self, id: i64, update: UpdateAbsentRequest) -> Result<Option<Absent>>;
    async fn delete_absent(&self, id: i64) -> Result<bool>;

    /// 文档方法
    async fn create_document(&self, document: NewDocument) -> Result<Document>;
    async fn get_document_by_id(&self, id: i64) -> Result<Option<Document>>;
    async fn list_documents_with_pagination(
        &self,
        query: DocumentListQuery,
    ) -> Result<DocumentListResponse>;
    // 学员可见的文档：公共、本人、已报名科目
    async fn list_documents_for_student(
        &self,
        student_id: i64,
        season: i32,
        subject_ids: &[i64],
    ) -> Result<Vec<Document>>;
    async fn update_document(
        &self,
        id: i64,
        update: UpdateDocumentRequest,
    ) -> Result<Option<Document>>;
    async fn delete_document(&self, id: i64) -> Result<bool>;

    /// 工作任务方法
    async fn create_general_task(&self, task: NewGeneralTask) -> Result<GeneralTask>;
    async fn get_general_task_by_id(&self, id: i64) -> Result<Option<GeneralTask>>;
    async fn list_general_tasks_with_pagination(
        &self,
        query: GeneralTaskListQuery,
    ) -> Result<GeneralTaskListResponse>;
    async fn update_general_task(
        &self,
        id: i64,
        update: UpdateGeneralTaskRequest,
    ) -> Result<Option<GeneralTask>>;
    async fn delete_general_task(&self, id: i64) -> Result<bool>;

    /// 表单开关方法
    async fn get_manage_form(&self, season: i32, form_type: FormType)
    -> Result<Option<ManageForm>>;
    async fn upsert_manage_form(
        &self,
        season: i32,
        form_type: FormType,
        status: FormStatus,
        data: serde_json::Value,
        updated_by: Option<i64>,
    ) -> Result<ManageForm>;

    /// 审计日志方法
    async fn create_audit_log(&self, log: NewAuditLog) -> Result<AuditLog>;
    async fn list_audit_logs_with_pagination(
        &self,
        query: AuditLogListQuery,
    ) -> Result<AuditLogListResponse>;

    /// 后台任务结果方法
    async fn create_task_result(&self, task_id: &str, name: &str) -> Result<TaskResult>;
    async fn update_task_result(
        &self,
        task_id: &str,
        status: TaskStatus,
        result: Option<serde_json::Value>,
        error: Option<String>,
    ) -> Result<Option<TaskResult>>;
    async fn get_task_result(&self, task_id: &str) -> Result<Option<TaskResult>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
