use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建学期表
        manager
            .create_table(
                Table::create()
                    .table(Seasons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Seasons::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Seasons::Season)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Seasons::Name).string().not_null())
                    .col(ColumnDef::new(Seasons::AcademicYear).string().null())
                    .col(
                        ColumnDef::new(Seasons::IsCurrent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Seasons::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Seasons::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建管理员表
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admins::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Admins::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Admins::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Admins::FullName).string().not_null())
                    .col(ColumnDef::new(Admins::Phone).string().null())
                    .col(ColumnDef::new(Admins::Role).string().not_null())
                    .col(ColumnDef::new(Admins::Status).string().not_null())
                    .col(ColumnDef::new(Admins::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Admins::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Admins::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建学员表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::Season).integer().not_null())
                    .col(ColumnDef::new(Students::NumericalOrder).integer().not_null())
                    .col(ColumnDef::new(Students::HolyName).string().null())
                    .col(ColumnDef::new(Students::FullName).string().not_null())
                    .col(
                        ColumnDef::new(Students::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Students::Phone).string().null())
                    .col(ColumnDef::new(Students::Address).string().null())
                    .col(ColumnDef::new(Students::Note).text().null())
                    .col(ColumnDef::new(Students::Status).string().not_null())
                    .col(ColumnDef::new(Students::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建讲师表
        manager
            .create_table(
                Table::create()
                    .table(Lecturers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lecturers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lecturers::Title).string().null())
                    .col(ColumnDef::new(Lecturers::HolyName).string().null())
                    .col(ColumnDef::new(Lecturers::FullName).string().not_null())
                    .col(ColumnDef::new(Lecturers::Email).string().null())
                    .col(ColumnDef::new(Lecturers::Phone).string().null())
                    .col(ColumnDef::new(Lecturers::Information).text().null())
                    .col(ColumnDef::new(Lecturers::Status).string().not_null())
                    .col(ColumnDef::new(Lecturers::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Lecturers::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建科目表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::Season).integer().not_null())
                    .col(ColumnDef::new(Subjects::Code).string().not_null())
                    .col(ColumnDef::new(Subjects::Title).string().not_null())
                    .col(ColumnDef::new(Subjects::LecturerId).big_integer().null())
                    .col(ColumnDef::new(Subjects::StartAt).big_integer().null())
                    .col(ColumnDef::new(Subjects::Subdivision).string().null())
                    .col(ColumnDef::new(Subjects::ZoomLink).string().null())
                    .col(ColumnDef::new(Subjects::Status).string().not_null())
                    .col(ColumnDef::new(Subjects::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Subjects::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Subjects::Table, Subjects::LecturerId)
                            .to(Lecturers::Table, Lecturers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建科目报名表
        manager
            .create_table(
                Table::create()
                    .table(SubjectRegistrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubjectRegistrations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubjectRegistrations::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectRegistrations::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectRegistrations::Season)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectRegistrations::IsAttendZoom)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SubjectRegistrations::RegisteredAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectRegistrations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubjectRegistrations::Table, SubjectRegistrations::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubjectRegistrations::Table, SubjectRegistrations::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建科目评价表
        manager
            .create_table(
                Table::create()
                    .table(SubjectEvaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubjectEvaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubjectEvaluations::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectEvaluations::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SubjectEvaluations::Season).integer().not_null())
                    .col(
                        ColumnDef::new(SubjectEvaluations::ContentScore)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectEvaluations::LecturerScore)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectEvaluations::OrganizationScore)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SubjectEvaluations::Opinion).text().null())
                    .col(
                        ColumnDef::new(SubjectEvaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubjectEvaluations::Table, SubjectEvaluations::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubjectEvaluations::Table, SubjectEvaluations::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建缺勤表
        manager
            .create_table(
                Table::create()
                    .table(Absents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Absents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Absents::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Absents::SubjectId).big_integer().not_null())
                    .col(ColumnDef::new(Absents::Season).integer().not_null())
                    .col(ColumnDef::new(Absents::AbsentType).string().not_null())
                    .col(ColumnDef::new(Absents::Reason).text().null())
                    .col(ColumnDef::new(Absents::Note).text().null())
                    .col(ColumnDef::new(Absents::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Absents::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Absents::Table, Absents::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Absents::Table, Absents::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建文档表
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Documents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Documents::Season).integer().not_null())
                    .col(ColumnDef::new(Documents::Name).string().not_null())
                    .col(ColumnDef::new(Documents::FileId).string().not_null())
                    .col(ColumnDef::new(Documents::Mimetype).string().null())
                    .col(ColumnDef::new(Documents::DocType).string().not_null())
                    .col(ColumnDef::new(Documents::StudentId).big_integer().null())
                    .col(ColumnDef::new(Documents::SubjectId).big_integer().null())
                    .col(ColumnDef::new(Documents::Description).text().null())
                    .col(ColumnDef::new(Documents::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Documents::Status).string().not_null())
                    .col(ColumnDef::new(Documents::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Documents::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建工作任务表
        manager
            .create_table(
                Table::create()
                    .table(GeneralTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GeneralTasks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GeneralTasks::Season).integer().not_null())
                    .col(ColumnDef::new(GeneralTasks::Title).string().not_null())
                    .col(ColumnDef::new(GeneralTasks::Description).text().null())
                    .col(ColumnDef::new(GeneralTasks::Role).string().not_null())
                    .col(ColumnDef::new(GeneralTasks::TaskType).string().not_null())
                    .col(ColumnDef::new(GeneralTasks::StartAt).big_integer().not_null())
                    .col(ColumnDef::new(GeneralTasks::EndAt).big_integer().not_null())
                    .col(ColumnDef::new(GeneralTasks::DocumentIds).text().not_null())
                    .col(ColumnDef::new(GeneralTasks::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(GeneralTasks::Status).string().not_null())
                    .col(ColumnDef::new(GeneralTasks::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(GeneralTasks::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建表单开关表
        manager
            .create_table(
                Table::create()
                    .table(ManageForms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ManageForms::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ManageForms::Season).integer().not_null())
                    .col(ColumnDef::new(ManageForms::FormType).string().not_null())
                    .col(ColumnDef::new(ManageForms::Status).string().not_null())
                    .col(ColumnDef::new(ManageForms::Data).text().not_null())
                    .col(ColumnDef::new(ManageForms::UpdatedBy).big_integer().null())
                    .col(ColumnDef::new(ManageForms::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(ManageForms::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建审计日志表
        manager
            .create_table(
                Table::create()
                    .table(AuditLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuditLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuditLogs::AdminId).big_integer().not_null())
                    .col(ColumnDef::new(AuditLogs::Action).string().not_null())
                    .col(ColumnDef::new(AuditLogs::Endpoint).string().not_null())
                    .col(ColumnDef::new(AuditLogs::Description).text().null())
                    .col(ColumnDef::new(AuditLogs::Season).integer().null())
                    .col(ColumnDef::new(AuditLogs::IpAddress).string().null())
                    .col(ColumnDef::new(AuditLogs::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建后台任务结果表
        manager
            .create_table(
                Table::create()
                    .table(TaskResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TaskResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TaskResults::TaskId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TaskResults::Name).string().not_null())
                    .col(ColumnDef::new(TaskResults::Status).string().not_null())
                    .col(ColumnDef::new(TaskResults::Result).text().null())
                    .col(ColumnDef::new(TaskResults::Error).text().null())
                    .col(ColumnDef::new(TaskResults::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(TaskResults::DoneAt).big_integer().null())
                    .to_owned(),
            )
            .await?;

        // 唯一索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_season_order")
                    .table(Students::Table)
                    .col(Students::Season)
                    .col(Students::NumericalOrder)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subjects_season_code")
                    .table(Subjects::Table)
                    .col(Subjects::Season)
                    .col(Subjects::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_registrations_student_subject")
                    .table(SubjectRegistrations::Table)
                    .col(SubjectRegistrations::StudentId)
                    .col(SubjectRegistrations::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluations_student_subject")
                    .table(SubjectEvaluations::Table)
                    .col(SubjectEvaluations::StudentId)
                    .col(SubjectEvaluations::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_absents_student_subject")
                    .table(Absents::Table)
                    .col(Absents::StudentId)
                    .col(Absents::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_manage_forms_season_type")
                    .table(ManageForms::Table)
                    .col(ManageForms::Season)
                    .col(ManageForms::FormType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 学期查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_registrations_season")
                    .table(SubjectRegistrations::Table)
                    .col(SubjectRegistrations::Season)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluations_season")
                    .table(SubjectEvaluations::Table)
                    .col(SubjectEvaluations::Season)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_absents_season")
                    .table(Absents::Table)
                    .col(Absents::Season)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_documents_season")
                    .table(Documents::Table)
                    .col(Documents::Season)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_audit_logs_admin_id")
                    .table(AuditLogs::Table)
                    .col(AuditLogs::AdminId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(TaskResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AuditLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ManageForms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GeneralTasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Absents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubjectEvaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubjectRegistrations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lecturers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Seasons::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Seasons {
    #[sea_orm(iden = "seasons")]
    Table,
    Id,
    Season,
    Name,
    AcademicYear,
    IsCurrent,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Admins {
    #[sea_orm(iden = "admins")]
    Table,
    Id,
    Email,
    PasswordHash,
    FullName,
    Phone,
    Role,
    Status,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    Season,
    NumericalOrder,
    HolyName,
    FullName,
    Email,
    PasswordHash,
    Phone,
    Address,
    Note,
    Status,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Lecturers {
    #[sea_orm(iden = "lecturers")]
    Table,
    Id,
    Title,
    HolyName,
    FullName,
    Email,
    Phone,
    Information,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Season,
    Code,
    Title,
    LecturerId,
    StartAt,
    Subdivision,
    ZoomLink,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SubjectRegistrations {
    #[sea_orm(iden = "subject_registrations")]
    Table,
    Id,
    StudentId,
    SubjectId,
    Season,
    IsAttendZoom,
    RegisteredAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SubjectEvaluations {
    #[sea_orm(iden = "subject_evaluations")]
    Table,
    Id,
    StudentId,
    SubjectId,
    Season,
    ContentScore,
    LecturerScore,
    OrganizationScore,
    Opinion,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Absents {
    #[sea_orm(iden = "absents")]
    Table,
    Id,
    StudentId,
    SubjectId,
    Season,
    AbsentType,
    Reason,
    Note,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Documents {
    #[sea_orm(iden = "documents")]
    Table,
    Id,
    Season,
    Name,
    FileId,
    Mimetype,
    DocType,
    StudentId,
    SubjectId,
    Description,
    CreatedBy,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum GeneralTasks {
    #[sea_orm(iden = "general_tasks")]
    Table,
    Id,
    Season,
    Title,
    Description,
    Role,
    TaskType,
    StartAt,
    EndAt,
    DocumentIds,
    CreatedBy,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ManageForms {
    #[sea_orm(iden = "manage_forms")]
    Table,
    Id,
    Season,
    FormType,
    Status,
    Data,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AuditLogs {
    #[sea_orm(iden = "audit_logs")]
    Table,
    Id,
    AdminId,
    Action,
    Endpoint,
    Description,
    Season,
    IpAddress,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TaskResults {
    #[sea_orm(iden = "task_results")]
    Table,
    Id,
    TaskId,
    Name,
    Status,
    Result,
    Error,
    CreatedAt,
    DoneAt,
}
