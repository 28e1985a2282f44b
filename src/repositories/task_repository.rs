use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{parent, project, student, task, teacher};
use crate::policy::Caller;
use crate::static_service::DATABASE_CONNECTION;

pub struct TaskRepository;

impl TaskRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    /// Role-scoped task listing, soonest due date first. Students browse the
    /// whole catalog of assignments; teachers see their own; parents see
    /// tasks their children have submitted against; admins see everything.
    pub async fn list_for_caller(&self, caller: &Caller) -> Result<Vec<task::Model>> {
        let db = self.get_connection();
        let query = task::Entity::find().order_by_asc(task::Column::DueDate);

        let tasks = match caller.role {
            RoleEnum::Admin | RoleEnum::Student => query.all(db).await?,
            RoleEnum::Teacher => {
                query
                    .join(JoinType::InnerJoin, task::Relation::Teacher.def())
                    .filter(teacher::Column::UserId.eq(caller.user_id))
                    .all(db)
                    .await?
            }
            RoleEnum::Parent => {
                query
                    .join_rev(JoinType::InnerJoin, project::Relation::Task.def())
                    .join(JoinType::InnerJoin, project::Relation::Student.def())
                    .join(JoinType::InnerJoin, student::Relation::Parent.def())
                    .filter(parent::Column::UserId.eq(caller.user_id))
                    .distinct()
                    .all(db)
                    .await?
            }
        };

        Ok(tasks)
    }

    pub async fn find_by_id(&self, task_id: i32) -> Result<Option<task::Model>> {
        let db = self.get_connection();
        let found = task::Entity::find_by_id(task_id).one(db).await?;
        Ok(found)
    }

    pub async fn find_by_ids(&self, task_ids: Vec<i32>) -> Result<Vec<task::Model>> {
        if task_ids.is_empty() {
            return Ok(Vec::new());
        }
        let db = self.get_connection();
        let found = task::Entity::find()
            .filter(task::Column::TaskId.is_in(task_ids))
            .all(db)
            .await?;
        Ok(found)
    }

    pub async fn create(
        &self,
        teacher_id: i32,
        task_name: String,
        task_description: String,
        due_date: NaiveDate,
    ) -> Result<task::Model> {
        let db = self.get_connection();
        let created = task::ActiveModel {
            teacher_id: Set(teacher_id),
            task_name: Set(task_name),
            task_description: Set(task_description),
            due_date: Set(due_date),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(created)
    }

    pub async fn update(
        &self,
        task_id: i32,
        task_name: String,
        task_description: String,
        due_date: NaiveDate,
    ) -> Result<task::Model> {
        let db = self.get_connection();
        let found = task::Entity::find_by_id(task_id)
            .one(db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Task not found"))?;

        let mut active: task::ActiveModel = found.into();
        active.task_name = Set(task_name);
        active.task_description = Set(task_description);
        active.due_date = Set(due_date);

        let updated = active.update(db).await?;
        Ok(updated)
    }

    /// Whether the task's owning teacher resolves to this user.
    pub async fn owned_by_user(&self, task_id: i32, user_id: i32) -> Result<bool> {
        let db = self.get_connection();
        let count = task::Entity::find_by_id(task_id)
            .join(JoinType::InnerJoin, task::Relation::Teacher.def())
            .filter(teacher::Column::UserId.eq(user_id))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    pub async fn project_count(&self, task_id: i32) -> Result<u64> {
        let db = self.get_connection();
        let count = project::Entity::find()
            .filter(project::Column::TaskId.eq(task_id))
            .count(db)
            .await?;
        Ok(count)
    }

    pub async fn delete(&self, task_id: i32) -> Result<()> {
        let db = self.get_connection();
        task::Entity::delete_by_id(task_id).exec(db).await?;
        Ok(())
    }
}
