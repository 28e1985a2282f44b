use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::entities::sea_orm_active_enums::ProjectStatus;
use crate::entities::{project, project_attachment};
use crate::policy::{self, Caller};
use crate::static_service::DATABASE_CONNECTION;

/// One attachment already persisted to disk, pending its database row.
pub struct NewAttachment {
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
}

pub struct ProjectRepository;

impl ProjectRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn list_for_caller(&self, caller: &Caller) -> Result<Vec<project::Model>> {
        let db = self.get_connection();
        let projects = policy::scoped_projects(caller)
            .order_by_desc(project::Column::SubmissionDate)
            .all(db)
            .await?;
        Ok(projects)
    }

    /// Unscoped fetch. The status-transition path deliberately skips the
    /// ownership gate; see DESIGN.md.
    pub async fn find_by_id(&self, project_id: i32) -> Result<Option<project::Model>> {
        let db = self.get_connection();
        let found = project::Entity::find_by_id(project_id).one(db).await?;
        Ok(found)
    }

    pub async fn find_by_ids(&self, project_ids: Vec<i32>) -> Result<Vec<project::Model>> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }
        let db = self.get_connection();
        let found = project::Entity::find()
            .filter(project::Column::ProjectId.is_in(project_ids))
            .all(db)
            .await?;
        Ok(found)
    }

    /// Inserts the project and its attachment rows as one unit, so a failed
    /// attachment insert never leaves a project referencing missing files.
    pub async fn create_with_attachments(
        &self,
        student_id: i32,
        task_id: i32,
        title: String,
        description: String,
        attachments: Vec<NewAttachment>,
    ) -> Result<project::Model> {
        let db = self.get_connection();
        let now = Utc::now().naive_utc();

        let txn = db.begin().await?;

        let created = project::ActiveModel {
            student_id: Set(student_id),
            task_id: Set(task_id),
            project_title: Set(title),
            project_description: Set(description),
            status: Set(ProjectStatus::Submitted),
            submission_date: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for attachment in attachments {
            project_attachment::ActiveModel {
                project_id: Set(created.project_id),
                file_name: Set(attachment.file_name),
                file_path: Set(attachment.file_path),
                file_type: Set(attachment.file_type),
                uploaded_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(created)
    }

    pub async fn update_status(
        &self,
        project_id: i32,
        status: ProjectStatus,
    ) -> Result<project::Model> {
        let db = self.get_connection();
        let found = project::Entity::find_by_id(project_id)
            .one(db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Project not found"))?;

        let mut active: project::ActiveModel = found.into();
        active.status = Set(status);

        let updated = active.update(db).await?;
        Ok(updated)
    }

    pub async fn attachments_for_project(
        &self,
        project_id: i32,
    ) -> Result<Vec<project_attachment::Model>> {
        let db = self.get_connection();
        let attachments = project_attachment::Entity::find()
            .filter(project_attachment::Column::ProjectId.eq(project_id))
            .all(db)
            .await?;
        Ok(attachments)
    }

    pub async fn attachments_for_projects(
        &self,
        project_ids: Vec<i32>,
    ) -> Result<Vec<project_attachment::Model>> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }
        let db = self.get_connection();
        let attachments = project_attachment::Entity::find()
            .filter(project_attachment::Column::ProjectId.is_in(project_ids))
            .all(db)
            .await?;
        Ok(attachments)
    }
}
