use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{parent, project, student, task, teacher, user};
use crate::static_service::DATABASE_CONNECTION;

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<user::Model>> {
        let db = self.get_connection();
        let found = user::Entity::find_by_id(user_id).one(db).await?;
        Ok(found)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        let db = self.get_connection();
        let found = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(db)
            .await?;
        Ok(found)
    }

    pub async fn find_by_ids(&self, user_ids: Vec<i32>) -> Result<Vec<user::Model>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let db = self.get_connection();
        let found = user::Entity::find()
            .filter(user::Column::UserId.is_in(user_ids))
            .all(db)
            .await?;
        Ok(found)
    }

    /// Creates the user row and its role-subtype row as one unit. Users and
    /// subtype records are born together; a failure on either side rolls back
    /// both.
    pub async fn register(
        &self,
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
        role: RoleEnum,
    ) -> Result<user::Model> {
        let db = self.get_connection();
        let now = Utc::now().naive_utc();
        let today = now.date();

        let txn = db.begin().await?;

        let created = user::ActiveModel {
            first_name: Set(first_name),
            last_name: Set(last_name),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(role),
            created_at: Set(now),
            last_login: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        match role {
            RoleEnum::Student => {
                student::ActiveModel {
                    user_id: Set(created.user_id),
                    parent_id: Set(None),
                    grade: Set(None),
                    registration_date: Set(Some(today)),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
            RoleEnum::Teacher => {
                teacher::ActiveModel {
                    user_id: Set(created.user_id),
                    hire_date: Set(Some(today)),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
            RoleEnum::Parent => {
                parent::ActiveModel {
                    user_id: Set(created.user_id),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
            RoleEnum::Admin => {}
        }

        txn.commit().await?;
        Ok(created)
    }

    pub async fn update_last_login(&self, user_id: i32) -> Result<()> {
        let db = self.get_connection();
        let found = user::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found"))?;

        let mut active: user::ActiveModel = found.into();
        active.last_login = Set(Some(Utc::now().naive_utc()));
        active.update(db).await?;
        Ok(())
    }

    pub async fn update_profile(
        &self,
        user_id: i32,
        first_name: String,
        last_name: String,
        email: String,
    ) -> Result<user::Model> {
        let db = self.get_connection();
        let found = user::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found"))?;

        let mut active: user::ActiveModel = found.into();
        active.first_name = Set(first_name);
        active.last_name = Set(last_name);
        active.email = Set(email);

        let updated = active.update(db).await?;
        Ok(updated)
    }

    pub async fn update_password(&self, user_id: i32, password_hash: String) -> Result<()> {
        let db = self.get_connection();
        let found = user::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found"))?;

        let mut active: user::ActiveModel = found.into();
        active.password_hash = Set(password_hash);
        active.update(db).await?;
        Ok(())
    }

    pub async fn email_used_by_other(&self, email: &str, user_id: i32) -> Result<bool> {
        let db = self.get_connection();
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::UserId.ne(user_id))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    pub async fn find_student_by_user_id(&self, user_id: i32) -> Result<Option<student::Model>> {
        let db = self.get_connection();
        let found = student::Entity::find()
            .filter(student::Column::UserId.eq(user_id))
            .one(db)
            .await?;
        Ok(found)
    }

    pub async fn find_teacher_by_user_id(&self, user_id: i32) -> Result<Option<teacher::Model>> {
        let db = self.get_connection();
        let found = teacher::Entity::find()
            .filter(teacher::Column::UserId.eq(user_id))
            .one(db)
            .await?;
        Ok(found)
    }

    pub async fn find_parent_by_user_id(&self, user_id: i32) -> Result<Option<parent::Model>> {
        let db = self.get_connection();
        let found = parent::Entity::find()
            .filter(parent::Column::UserId.eq(user_id))
            .one(db)
            .await?;
        Ok(found)
    }

    pub async fn find_teachers_by_ids(&self, teacher_ids: Vec<i32>) -> Result<Vec<teacher::Model>> {
        if teacher_ids.is_empty() {
            return Ok(Vec::new());
        }
        let db = self.get_connection();
        let found = teacher::Entity::find()
            .filter(teacher::Column::TeacherId.is_in(teacher_ids))
            .all(db)
            .await?;
        Ok(found)
    }

    pub async fn find_students_by_ids(&self, student_ids: Vec<i32>) -> Result<Vec<student::Model>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }
        let db = self.get_connection();
        let found = student::Entity::find()
            .filter(student::Column::StudentId.is_in(student_ids))
            .all(db)
            .await?;
        Ok(found)
    }

    pub async fn find_student_with_user(
        &self,
        student_id: i32,
    ) -> Result<Option<(student::Model, Option<user::Model>)>> {
        let db = self.get_connection();
        let found = student::Entity::find_by_id(student_id)
            .find_also_related(user::Entity)
            .one(db)
            .await?;
        Ok(found)
    }

    pub async fn find_children_of_parent(&self, parent_id: i32) -> Result<Vec<student::Model>> {
        let db = self.get_connection();
        let children = student::Entity::find()
            .filter(student::Column::ParentId.eq(parent_id))
            .all(db)
            .await?;
        Ok(children)
    }

    /// Students visible to a teacher: anyone who has submitted a project
    /// against one of the teacher's tasks.
    pub async fn find_students_of_teacher(&self, user_id: i32) -> Result<Vec<student::Model>> {
        let db = self.get_connection();
        let students = student::Entity::find()
            .join_rev(JoinType::InnerJoin, project::Relation::Student.def())
            .join(JoinType::InnerJoin, project::Relation::Task.def())
            .join(JoinType::InnerJoin, task::Relation::Teacher.def())
            .filter(teacher::Column::UserId.eq(user_id))
            .distinct()
            .all(db)
            .await?;
        Ok(students)
    }

    pub async fn find_all_students(&self) -> Result<Vec<student::Model>> {
        let db = self.get_connection();
        let students = student::Entity::find().all(db).await?;
        Ok(students)
    }
}
