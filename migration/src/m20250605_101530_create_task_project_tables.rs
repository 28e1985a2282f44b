use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tasks::TaskId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tasks::TeacherId).integer().not_null())
                    .col(ColumnDef::new(Tasks::TaskName).string().not_null())
                    .col(ColumnDef::new(Tasks::TaskDescription).text().not_null())
                    .col(ColumnDef::new(Tasks::DueDate).date().not_null())
                    .col(
                        ColumnDef::new(Tasks::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_teacher")
                            .from_tbl(Tasks::Table)
                            .from_col(Tasks::TeacherId)
                            .to_tbl(Teachers::Table)
                            .to_col(Teachers::TeacherId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::ProjectId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::StudentId).integer().not_null())
                    .col(ColumnDef::new(Projects::TaskId).integer().not_null())
                    .col(ColumnDef::new(Projects::ProjectTitle).string().not_null())
                    .col(
                        ColumnDef::new(Projects::ProjectDescription)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Projects::Status)
                            .string()
                            .not_null()
                            .default("Submitted"),
                    )
                    .col(
                        ColumnDef::new(Projects::SubmissionDate)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_student")
                            .from_tbl(Projects::Table)
                            .from_col(Projects::StudentId)
                            .to_tbl(Students::Table)
                            .to_col(Students::StudentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_task")
                            .from_tbl(Projects::Table)
                            .from_col(Projects::TaskId)
                            .to_tbl(Tasks::Table)
                            .to_col(Tasks::TaskId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectAttachments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectAttachments::AttachmentId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProjectAttachments::ProjectId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectAttachments::FileName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectAttachments::FilePath)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectAttachments::FileType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectAttachments::UploadedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_attachments_project")
                            .from_tbl(ProjectAttachments::Table)
                            .from_col(ProjectAttachments::ProjectId)
                            .to_tbl(Projects::Table)
                            .to_col(Projects::ProjectId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_teacher_id")
                    .table(Tasks::Table)
                    .col(Tasks::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_student_id")
                    .table(Projects::Table)
                    .col(Projects::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_projects_task_id")
                    .table(Projects::Table)
                    .col(Projects::TaskId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_project_attachments_project_id")
                    .table(ProjectAttachments::Table)
                    .col(ProjectAttachments::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectAttachments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    TaskId,
    TeacherId,
    TaskName,
    TaskDescription,
    DueDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    ProjectId,
    StudentId,
    TaskId,
    ProjectTitle,
    ProjectDescription,
    Status,
    SubmissionDate,
}

#[derive(DeriveIden)]
enum ProjectAttachments {
    Table,
    AttachmentId,
    ProjectId,
    FileName,
    FilePath,
    FileType,
    UploadedAt,
}

#[derive(DeriveIden)]
enum Teachers {
    Table,
    TeacherId,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    StudentId,
}
