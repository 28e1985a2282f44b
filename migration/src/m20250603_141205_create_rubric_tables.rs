use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Competencies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Competencies::CompetencyId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Competencies::CompetencyName)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Competencies::CompetencyDescription)
                            .string()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Criteria::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Criteria::CriteriaId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Criteria::CompetencyId).integer().not_null())
                    .col(ColumnDef::new(Criteria::CriteriaName).string().not_null())
                    .col(ColumnDef::new(Criteria::CriteriaDescription).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_criteria_competency")
                            .from_tbl(Criteria::Table)
                            .from_col(Criteria::CompetencyId)
                            .to_tbl(Competencies::Table)
                            .to_col(Competencies::CompetencyId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Shared ordinal scale; the maximum score is always looked up, never assumed
        manager
            .create_table(
                Table::create()
                    .table(PerformanceLevels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PerformanceLevels::PerformanceLevelId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PerformanceLevels::LevelName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PerformanceLevels::ScoreValue)
                            .integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_criteria_competency_id")
                    .table(Criteria::Table)
                    .col(Criteria::CompetencyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PerformanceLevels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Criteria::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Competencies::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Competencies {
    Table,
    CompetencyId,
    CompetencyName,
    CompetencyDescription,
}

#[derive(DeriveIden)]
enum Criteria {
    Table,
    CriteriaId,
    CompetencyId,
    CriteriaName,
    CriteriaDescription,
}

#[derive(DeriveIden)]
enum PerformanceLevels {
    Table,
    PerformanceLevelId,
    LevelName,
    ScoreValue,
}
