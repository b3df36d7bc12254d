//! 数据模型定义
//!
//! 每个资源目录下分为 `entities`（业务实体）、`requests`（请求对象）
//! 与 `responses`（响应 DTO）。

pub mod absents;
pub mod admins;
pub mod audit_logs;
pub mod auth;
pub mod common;
pub mod documents;
pub mod evaluations;
pub mod general_tasks;
pub mod manage_forms;
pub mod registrations;
pub mod roll_call;
pub mod seasons;
pub mod students;
pub mod subjects;
pub mod tasks;
pub mod lecturers;

pub use common::{ApiResponse, CommonStatus, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 0 表示成功；1xxx 通用错误，2xxx 认证，其余按资源分段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    RateLimitExceeded = 1005,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,
    AccountDisabled = 2001,
    PasswordInvalid = 2002,

    // 学期
    SeasonNotFound = 3000,
    SeasonAlreadyExists = 3001,
    SeasonWriteForbidden = 3002,

    // 管理员
    AdminNotFound = 4000,
    AdminAlreadyExists = 4001,
    CanNotDeleteCurrentAdmin = 4002,
    AdminRoleInvalid = 4003,

    // 学员
    StudentNotFound = 5000,
    StudentAlreadyExists = 5001,

    // 讲师
    LecturerNotFound = 6000,

    // 科目
    SubjectNotFound = 7000,
    SubjectAlreadyExists = 7001,
    SubjectNotRegistered = 7002,
    SubjectNotInCurrentSeason = 7003,

    // 表单
    FormNotFound = 8000,
    FormClosed = 8001,

    // 评价 / 缺勤
    EvaluationAlreadySubmitted = 8100,
    EvaluationScoreInvalid = 8101,
    AbsentNotFound = 8200,

    // 文档 / 工作任务
    DocumentNotFound = 9000,
    GeneralTaskNotFound = 9100,

    // 后台任务
    TaskNotFound = 9200,
    TaskQueueUnavailable = 9201,
}
