//! Role-scoped access control.
//!
//! Every read or write against projects and students funnels through the
//! capability functions here, keyed on an explicit [`Caller`] rather than any
//! ambient request state. Each capability is one polymorphic dispatch on the
//! caller's role; handlers never re-implement the branch logic.

use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QuerySelect, RelationTrait, Select,
};

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{parent, project, student, task, teacher};
use crate::static_service::DATABASE_CONNECTION;

/// The authenticated caller, decoded from the identity token and passed
/// explicitly into every policy decision.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: i32,
    pub role: RoleEnum,
    pub email: String,
    pub name: String,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == RoleEnum::Admin
    }
}

fn get_connection() -> &'static DatabaseConnection {
    DATABASE_CONNECTION
        .get()
        .expect("DATABASE_CONNECTION not set")
}

/// Projects the caller is entitled to see, as a reusable filtered select.
///
/// admin: everything. teacher: projects whose task they authored. parent:
/// their children's projects. student: their own. A missing subtype row
/// produces an empty join, which denies.
pub fn scoped_projects(caller: &Caller) -> Select<project::Entity> {
    let query = project::Entity::find();

    match caller.role {
        RoleEnum::Admin => query,
        RoleEnum::Student => query
            .join(JoinType::InnerJoin, project::Relation::Student.def())
            .filter(student::Column::UserId.eq(caller.user_id)),
        RoleEnum::Teacher => query
            .join(JoinType::InnerJoin, project::Relation::Task.def())
            .join(JoinType::InnerJoin, task::Relation::Teacher.def())
            .filter(teacher::Column::UserId.eq(caller.user_id)),
        RoleEnum::Parent => query
            .join(JoinType::InnerJoin, project::Relation::Student.def())
            .join(JoinType::InnerJoin, student::Relation::Parent.def())
            .filter(parent::Column::UserId.eq(caller.user_id)),
    }
}

/// Fetches one project iff the caller may touch it.
///
/// Returns `None` both when the project does not exist and when access is
/// denied; callers deliberately cannot tell the two apart.
pub async fn accessible_project(
    caller: &Caller,
    project_id: i32,
) -> Result<Option<project::Model>> {
    let db = get_connection();
    let found = scoped_projects(caller)
        .filter(project::Column::ProjectId.eq(project_id))
        .one(db)
        .await?;
    Ok(found)
}

/// Whether the caller may read a student's aggregate progress.
///
/// admin: always. teacher: iff the student has at least one project under one
/// of the caller's tasks. parent: iff the student is linked to them. student:
/// iff the record is their own.
pub async fn can_access_student(caller: &Caller, student_id: i32) -> Result<bool> {
    let db = get_connection();

    let allowed = match caller.role {
        RoleEnum::Admin => true,
        RoleEnum::Teacher => {
            project::Entity::find()
                .join(JoinType::InnerJoin, project::Relation::Task.def())
                .join(JoinType::InnerJoin, task::Relation::Teacher.def())
                .filter(project::Column::StudentId.eq(student_id))
                .filter(teacher::Column::UserId.eq(caller.user_id))
                .count(db)
                .await?
                > 0
        }
        RoleEnum::Parent => {
            student::Entity::find_by_id(student_id)
                .join(JoinType::InnerJoin, student::Relation::Parent.def())
                .filter(parent::Column::UserId.eq(caller.user_id))
                .count(db)
                .await?
                > 0
        }
        RoleEnum::Student => {
            student::Entity::find_by_id(student_id)
                .filter(student::Column::UserId.eq(caller.user_id))
                .count(db)
                .await?
                > 0
        }
    };

    Ok(allowed)
}
