pub mod absents;
pub mod access;
pub mod admins;
pub mod audit_logs;
pub mod auth;
pub mod documents;
pub mod general_tasks;
pub mod lecturers;
pub mod manage_forms;
pub mod portal;
pub mod roll_call;
pub mod seasons;
pub mod students;
pub mod subjects;
pub mod tasks;

pub use absents::AbsentService;
pub use admins::AdminService;
pub use audit_logs::AuditLogService;
pub use auth::AuthService;
pub use documents::DocumentService;
pub use general_tasks::GeneralTaskService;
pub use lecturers::LecturerService;
pub use manage_forms::ManageFormService;
pub use portal::PortalService;
pub use roll_call::RollCallService;
pub use seasons::SeasonService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use tasks::TaskService;

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use tracing::{debug, error};

use crate::errors::TrainHubError;
use crate::jobs::{Job, TaskQueue};
use crate::models::admins::entities::Admin;
use crate::models::audit_logs::entities::{AuditAction, NewAuditLog};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

pub(crate) fn task_queue_from_request(request: &HttpRequest) -> Option<TaskQueue> {
    request
        .app_data::<web::Data<TaskQueue>>()
        .map(|queue| queue.get_ref().clone())
}

pub(crate) fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message))
}

pub(crate) fn forbidden(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn internal_error(context: &str, err: &TrainHubError) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {}", err.message()),
    ))
}

/// 存储层错误映射：唯一约束 409，未找到 404，校验 400，其余 500
pub(crate) fn storage_failure(
    context: &str,
    err: &TrainHubError,
    conflict: (ErrorCode, &str),
) -> HttpResponse {
    if err.is_unique_violation() {
        return HttpResponse::Conflict().json(ApiResponse::error_empty(conflict.0, conflict.1));
    }
    match err {
        TrainHubError::NotFound(msg) => not_found(ErrorCode::NotFound, msg.clone()),
        TrainHubError::Validation(msg) => bad_request(msg.clone()),
        _ => internal_error(context, err),
    }
}

/// 记录管理员写操作，异步写入，失败不影响请求
pub(crate) fn record_audit(
    request: &HttpRequest,
    admin: &Admin,
    action: AuditAction,
    description: impl Into<String>,
    season: Option<i32>,
) {
    let Some(queue) = task_queue_from_request(request) else {
        debug!("Task queue unavailable, audit log skipped");
        return;
    };
    let log = NewAuditLog {
        admin_id: admin.id,
        action,
        endpoint: format!("{} {}", request.method(), request.path()),
        description: Some(description.into()),
        season,
        ip_address: request
            .connection_info()
            .realip_remote_addr()
            .map(str::to_string),
    };
    let _ = queue.enqueue(Job::AuditLog(log));
}

#[cfg(test)]
pub(crate) mod test_support {
    //! 服务层测试工具：内存数据库 + 已登录的调用方

    use super::*;
    use crate::jobs::JobContext;
    use crate::jobs::mailer::tests::RecordingMailer;
    use crate::models::admins::requests::CreateAdminRequest;
    use crate::models::auth::{Principal, UserRole};
    use crate::models::seasons::requests::CreateSeasonRequest;
    use crate::models::students::entities::Student;
    use crate::models::students::requests::NewStudent;
    use crate::models::subjects::entities::Subject;
    use crate::models::subjects::requests::NewSubject;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use actix_web::HttpMessage;
    use actix_web::test::TestRequest;

    pub(crate) struct TestEnv {
        pub storage: Arc<dyn Storage>,
        pub queue: TaskQueue,
        pub mailer: Arc<RecordingMailer>,
    }

    impl TestEnv {
        /// 创建第 1 期（当前）与第 2 期两个学期
        pub(crate) async fn new() -> Self {
            let storage: Arc<dyn Storage> =
                Arc::new(SeaOrmStorage::new_in_memory().await.unwrap());
            for (season, current) in [(1, true), (2, false)] {
                storage
                    .create_season(CreateSeasonRequest {
                        season,
                        name: format!("Season {season}"),
                        academic_year: None,
                        set_current: current,
                    })
                    .await
                    .unwrap();
            }
            let mailer = Arc::new(RecordingMailer::default());
            let (queue, _) = TaskQueue::start(
                JobContext {
                    storage: storage.clone(),
                    mailer: mailer.clone(),
                },
                64,
                2,
            );
            Self {
                storage,
                queue,
                mailer,
            }
        }

        /// 换成拒绝所有投递的队列
        pub(crate) fn close_queue(&mut self) {
            self.queue = TaskQueue::closed(JobContext {
                storage: self.storage.clone(),
                mailer: self.mailer.clone(),
            });
        }

        pub(crate) async fn admin(&self, role: UserRole) -> Admin {
            self.storage
                .create_admin(CreateAdminRequest {
                    email: format!("{}-{}@trainhub.test", role, uuid::Uuid::new_v4()),
                    password: crate::utils::password::hash_password("Password123").unwrap(),
                    full_name: format!("{role} account"),
                    phone: None,
                    role,
                })
                .await
                .unwrap()
        }

        pub(crate) async fn student(&self, season: i32, order: i32, email: &str) -> Student {
            self.storage
                .create_student(NewStudent {
                    season,
                    numerical_order: order,
                    holy_name: None,
                    full_name: format!("Student {order}"),
                    email: email.to_string(),
                    password_hash: crate::utils::password::hash_password("Password123")
                        .unwrap(),
                    phone: None,
                    address: None,
                    note: None,
                })
                .await
                .unwrap()
        }

        pub(crate) async fn subject(&self, season: i32, code: &str) -> Subject {
            self.storage
                .create_subject(NewSubject {
                    season,
                    code: code.to_string(),
                    title: format!("Subject {code}"),
                    lecturer_id: None,
                    start_at: None,
                    subdivision: None,
                    zoom_link: None,
                })
                .await
                .unwrap()
        }

        /// 带存储、队列与调用方的请求
        pub(crate) fn request(&self, principal: Option<Principal>) -> HttpRequest {
            let req = TestRequest::default()
                .app_data(web::Data::new(self.storage.clone()))
                .app_data(web::Data::new(self.queue.clone()))
                .to_http_request();
            if let Some(principal) = principal {
                req.extensions_mut().insert(principal);
            }
            req
        }

        pub(crate) fn as_admin(&self, admin: &Admin) -> HttpRequest {
            self.request(Some(Principal::Admin(admin.clone())))
        }

        pub(crate) fn as_student(&self, student: &Student) -> HttpRequest {
            self.request(Some(Principal::Student(student.clone())))
        }
    }

    /// 轮询直到条件成立，后台任务断言用
    pub(crate) async fn eventually(mut check: impl FnMut() -> bool) -> bool {
        for _ in 0..100 {
            if check() {
                return true;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        false
    }

    pub(crate) async fn body_json(resp: HttpResponse) -> serde_json::Value {
        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
