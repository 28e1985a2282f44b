use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use crate::entities::sea_orm_active_enums::{ProjectStatus, RoleEnum};
use crate::entities::{assessment, feedback, parent, project, student, task, teacher};
use crate::policy::Caller;
use crate::static_service::DATABASE_CONNECTION;

/// One scored (competency, criterion, performance level) judgment from a
/// submission payload.
pub struct AssessmentItem {
    pub competency_id: i32,
    pub criteria_id: i32,
    pub performance_level_id: i32,
    pub comments: Option<String>,
}

pub struct AssessmentRepository;

impl AssessmentRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    /// Role-scoped assessment listing, newest first. Students see their own
    /// projects' rows, teachers the rows they authored, parents their
    /// children's, admins everything.
    pub async fn list_for_caller(&self, caller: &Caller) -> Result<Vec<assessment::Model>> {
        let db = self.get_connection();
        let query = assessment::Entity::find().order_by_desc(assessment::Column::AssessmentDate);

        let assessments = match caller.role {
            RoleEnum::Admin => query.all(db).await?,
            RoleEnum::Teacher => {
                query
                    .join(JoinType::InnerJoin, assessment::Relation::Teacher.def())
                    .filter(teacher::Column::UserId.eq(caller.user_id))
                    .all(db)
                    .await?
            }
            RoleEnum::Student => {
                query
                    .join(JoinType::InnerJoin, assessment::Relation::Project.def())
                    .join(JoinType::InnerJoin, project::Relation::Student.def())
                    .filter(student::Column::UserId.eq(caller.user_id))
                    .all(db)
                    .await?
            }
            RoleEnum::Parent => {
                query
                    .join(JoinType::InnerJoin, assessment::Relation::Project.def())
                    .join(JoinType::InnerJoin, project::Relation::Student.def())
                    .join(JoinType::InnerJoin, student::Relation::Parent.def())
                    .filter(parent::Column::UserId.eq(caller.user_id))
                    .all(db)
                    .await?
            }
        };

        Ok(assessments)
    }

    pub async fn list_for_project(&self, project_id: i32) -> Result<Vec<assessment::Model>> {
        let db = self.get_connection();
        let assessments = assessment::Entity::find()
            .filter(assessment::Column::ProjectId.eq(project_id))
            .all(db)
            .await?;
        Ok(assessments)
    }

    pub async fn list_for_student(&self, student_id: i32) -> Result<Vec<assessment::Model>> {
        let db = self.get_connection();
        let assessments = assessment::Entity::find()
            .join(JoinType::InnerJoin, assessment::Relation::Project.def())
            .filter(project::Column::StudentId.eq(student_id))
            .all(db)
            .await?;
        Ok(assessments)
    }

    /// The submission transaction: every assessment row, the optional
    /// feedback row and the status flip to Assessed land together or not at
    /// all. An early return drops the open transaction, which rolls it back.
    pub async fn submit(
        &self,
        project_id: i32,
        teacher_id: i32,
        author_user_id: i32,
        items: Vec<AssessmentItem>,
        feedback_text: Option<String>,
    ) -> Result<usize> {
        let db = self.get_connection();
        let now = Utc::now().naive_utc();
        let inserted = items.len();

        let txn = db.begin().await?;

        for item in items {
            assessment::ActiveModel {
                project_id: Set(project_id),
                teacher_id: Set(teacher_id),
                competency_id: Set(item.competency_id),
                criteria_id: Set(item.criteria_id),
                performance_level_id: Set(item.performance_level_id),
                comments: Set(item.comments),
                assessment_date: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        if let Some(text) = feedback_text {
            feedback::ActiveModel {
                project_id: Set(project_id),
                user_id: Set(author_user_id),
                feedback_text: Set(text),
                feedback_date: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        let found = project::Entity::find_by_id(project_id)
            .one(&txn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Project not found"))?;
        let mut active: project::ActiveModel = found.into();
        active.status = Set(ProjectStatus::Assessed);
        active.update(&txn).await?;

        txn.commit().await?;
        Ok(inserted)
    }

    /// Whether the project sits under one of this teacher's tasks.
    pub async fn project_owned_by_teacher(
        &self,
        project_id: i32,
        teacher_id: i32,
    ) -> Result<bool> {
        let db = self.get_connection();
        let count = project::Entity::find_by_id(project_id)
            .join(JoinType::InnerJoin, project::Relation::Task.def())
            .filter(task::Column::TeacherId.eq(teacher_id))
            .count(db)
            .await?;
        Ok(count > 0)
    }
}
