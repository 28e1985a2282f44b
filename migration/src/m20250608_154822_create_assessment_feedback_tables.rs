use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only fact table; rows are never updated or deleted in-band
        manager
            .create_table(
                Table::create()
                    .table(Assessments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assessments::AssessmentId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assessments::ProjectId).integer().not_null())
                    .col(ColumnDef::new(Assessments::TeacherId).integer().not_null())
                    .col(
                        ColumnDef::new(Assessments::CompetencyId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assessments::CriteriaId).integer().not_null())
                    .col(
                        ColumnDef::new(Assessments::PerformanceLevelId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assessments::Comments).text().null())
                    .col(
                        ColumnDef::new(Assessments::AssessmentDate)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assessments_project")
                            .from_tbl(Assessments::Table)
                            .from_col(Assessments::ProjectId)
                            .to_tbl(Projects::Table)
                            .to_col(Projects::ProjectId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assessments_teacher")
                            .from_tbl(Assessments::Table)
                            .from_col(Assessments::TeacherId)
                            .to_tbl(Teachers::Table)
                            .to_col(Teachers::TeacherId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assessments_competency")
                            .from_tbl(Assessments::Table)
                            .from_col(Assessments::CompetencyId)
                            .to_tbl(Competencies::Table)
                            .to_col(Competencies::CompetencyId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assessments_criteria")
                            .from_tbl(Assessments::Table)
                            .from_col(Assessments::CriteriaId)
                            .to_tbl(Criteria::Table)
                            .to_col(Criteria::CriteriaId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assessments_performance_level")
                            .from_tbl(Assessments::Table)
                            .from_col(Assessments::PerformanceLevelId)
                            .to_tbl(PerformanceLevels::Table)
                            .to_col(PerformanceLevels::PerformanceLevelId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::FeedbackId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedback::ProjectId).integer().not_null())
                    .col(ColumnDef::new(Feedback::UserId).integer().not_null())
                    .col(ColumnDef::new(Feedback::FeedbackText).text().not_null())
                    .col(
                        ColumnDef::new(Feedback::FeedbackDate)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_project")
                            .from_tbl(Feedback::Table)
                            .from_col(Feedback::ProjectId)
                            .to_tbl(Projects::Table)
                            .to_col(Projects::ProjectId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_user")
                            .from_tbl(Feedback::Table)
                            .from_col(Feedback::UserId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assessments_project_id")
                    .table(Assessments::Table)
                    .col(Assessments::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assessments_competency_id")
                    .table(Assessments::Table)
                    .col(Assessments::CompetencyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_project_id")
                    .table(Feedback::Table)
                    .col(Feedback::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assessments::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Assessments {
    Table,
    AssessmentId,
    ProjectId,
    TeacherId,
    CompetencyId,
    CriteriaId,
    PerformanceLevelId,
    Comments,
    AssessmentDate,
}

#[derive(DeriveIden)]
enum Feedback {
    Table,
    FeedbackId,
    ProjectId,
    UserId,
    FeedbackText,
    FeedbackDate,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    ProjectId,
}

#[derive(DeriveIden)]
enum Teachers {
    Table,
    TeacherId,
}

#[derive(DeriveIden)]
enum Competencies {
    Table,
    CompetencyId,
}

#[derive(DeriveIden)]
enum Criteria {
    Table,
    CriteriaId,
}

#[derive(DeriveIden)]
enum PerformanceLevels {
    Table,
    PerformanceLevelId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
}
