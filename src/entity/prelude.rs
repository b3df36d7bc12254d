//! 预导入模块，方便使用

pub use super::absents::{ActiveModel as AbsentActiveModel, Entity as Absents, Model as AbsentModel};
pub use super::admins::{ActiveModel as AdminActiveModel, Entity as Admins, Model as AdminModel};
pub use super::audit_logs::{
    ActiveModel as AuditLogActiveModel, Entity as AuditLogs, Model as AuditLogModel,
};
pub use super::documents::{
    ActiveModel as DocumentActiveModel, Entity as Documents, Model as DocumentModel,
};
pub use super::general_tasks::{
    ActiveModel as GeneralTaskActiveModel, Entity as GeneralTasks, Model as GeneralTaskModel,
};
pub use super::lecturers::{
    ActiveModel as LecturerActiveModel, Entity as Lecturers, Model as LecturerModel,
};
pub use super::manage_forms::{
    ActiveModel as ManageFormActiveModel, Entity as ManageForms, Model as ManageFormModel,
};
pub use super::seasons::{ActiveModel as SeasonActiveModel, Entity as Seasons, Model as SeasonModel};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subject_evaluations::{
    ActiveModel as EvaluationActiveModel, Entity as SubjectEvaluations, Model as EvaluationModel,
};
pub use super::subject_registrations::{
    ActiveModel as RegistrationActiveModel, Entity as SubjectRegistrations,
    Model as RegistrationModel,
};
pub use super::subjects::{ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel};
pub use super::task_results::{
    ActiveModel as TaskResultActiveModel, Entity as TaskResults, Model as TaskResultModel,
};
