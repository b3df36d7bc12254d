pub mod auth;

pub mod admins;

pub mod seasons;

pub mod students;

pub mod lecturers;

pub mod subjects;

pub mod documents;

pub mod general_tasks;

pub mod manage_forms;

pub mod absents;

pub mod audit_logs;

pub mod roll_call;

pub mod portal;

pub use absents::configure_absent_routes;
pub use admins::configure_admin_routes;
pub use audit_logs::configure_audit_log_routes;
pub use auth::configure_auth_routes;
pub use documents::configure_document_routes;
pub use general_tasks::configure_general_task_routes;
pub use lecturers::configure_lecturer_routes;
pub use manage_forms::configure_manage_form_routes;
pub use portal::configure_portal_routes;
pub use roll_call::configure_roll_call_routes;
pub use seasons::configure_season_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
