//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 时间字段统一以 Unix 秒存储。

pub mod prelude;

pub mod absents;
pub mod admins;
pub mod audit_logs;
pub mod documents;
pub mod general_tasks;
pub mod lecturers;
pub mod manage_forms;
pub mod seasons;
pub mod students;
pub mod subject_evaluations;
pub mod subject_registrations;
pub mod subjects;
pub mod task_results;

use chrono::{DateTime, Utc};

/// Unix 秒转换为 UTC 时间
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
