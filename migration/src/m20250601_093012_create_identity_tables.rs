use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Users table with role stored as a plain string column
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::UserId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(ColumnDef::new(Users::LastLogin).timestamp().null())
                    .to_owned(),
            )
            .await?;

        // Teachers subtype table
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teachers::TeacherId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teachers::UserId).integer().not_null())
                    .col(ColumnDef::new(Teachers::HireDate).date().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teachers_user")
                            .from_tbl(Teachers::Table)
                            .from_col(Teachers::UserId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Parents subtype table
        manager
            .create_table(
                Table::create()
                    .table(Parents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Parents::ParentId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Parents::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parents_user")
                            .from_tbl(Parents::Table)
                            .from_col(Parents::UserId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Students subtype table, with a weak back-reference to parents
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::StudentId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::UserId).integer().not_null())
                    .col(ColumnDef::new(Students::ParentId).integer().null())
                    .col(ColumnDef::new(Students::Grade).string().null())
                    .col(ColumnDef::new(Students::RegistrationDate).date().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_user")
                            .from_tbl(Students::Table)
                            .from_col(Students::UserId)
                            .to_tbl(Users::Table)
                            .to_col(Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_students_parent")
                            .from_tbl(Students::Table)
                            .from_col(Students::ParentId)
                            .to_tbl(Parents::Table)
                            .to_col(Parents::ParentId)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_user_id")
                    .table(Students::Table)
                    .col(Students::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_teachers_user_id")
                    .table(Teachers::Table)
                    .col(Teachers::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parents_user_id")
                    .table(Parents::Table)
                    .col(Parents::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Parents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
    FirstName,
    LastName,
    Email,
    PasswordHash,
    Role,
    CreatedAt,
    LastLogin,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    StudentId,
    UserId,
    ParentId,
    Grade,
    RegistrationDate,
}

#[derive(DeriveIden)]
enum Teachers {
    Table,
    TeacherId,
    UserId,
    HireDate,
}

#[derive(DeriveIden)]
enum Parents {
    Table,
    ParentId,
    UserId,
}
