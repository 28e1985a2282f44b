pub use sea_orm_migration::prelude::*;

mod m20250601_093012_create_identity_tables;
mod m20250603_141205_create_rubric_tables;
mod m20250605_101530_create_task_project_tables;
mod m20250608_154822_create_assessment_feedback_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_093012_create_identity_tables::Migration),
            Box::new(m20250603_141205_create_rubric_tables::Migration),
            Box::new(m20250605_101530_create_task_project_tables::Migration),
            Box::new(m20250608_154822_create_assessment_feedback_tables::Migration),
        ]
    }
}
