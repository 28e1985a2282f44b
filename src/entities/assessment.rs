//! `SeaORM` Entity for assessments table
//!
//! Append-only: rows are inserted inside the submission transaction and
//! never updated or deleted afterwards.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "assessments"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub assessment_id: i32,
    pub project_id: i32,
    pub teacher_id: i32,
    pub competency_id: i32,
    pub criteria_id: i32,
    pub performance_level_id: i32,
    pub comments: Option<String>,
    pub assessment_date: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    AssessmentId,
    ProjectId,
    TeacherId,
    CompetencyId,
    CriteriaId,
    PerformanceLevelId,
    Comments,
    AssessmentDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    AssessmentId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Project,
    Teacher,
    Competency,
    Criteria,
    PerformanceLevel,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::AssessmentId => ColumnType::Integer.def(),
            Self::ProjectId => ColumnType::Integer.def(),
            Self::TeacherId => ColumnType::Integer.def(),
            Self::CompetencyId => ColumnType::Integer.def(),
            Self::CriteriaId => ColumnType::Integer.def(),
            Self::PerformanceLevelId => ColumnType::Integer.def(),
            Self::Comments => ColumnType::Text.def().null(),
            Self::AssessmentDate => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Project => Entity::belongs_to(super::project::Entity)
                .from(Column::ProjectId)
                .to(super::project::Column::ProjectId)
                .into(),
            Self::Teacher => Entity::belongs_to(super::teacher::Entity)
                .from(Column::TeacherId)
                .to(super::teacher::Column::TeacherId)
                .into(),
            Self::Competency => Entity::belongs_to(super::competency::Entity)
                .from(Column::CompetencyId)
                .to(super::competency::Column::CompetencyId)
                .into(),
            Self::Criteria => Entity::belongs_to(super::criteria::Entity)
                .from(Column::CriteriaId)
                .to(super::criteria::Column::CriteriaId)
                .into(),
            Self::PerformanceLevel => Entity::belongs_to(super::performance_level::Entity)
                .from(Column::PerformanceLevelId)
                .to(super::performance_level::Column::PerformanceLevelId)
                .into(),
        }
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::competency::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Competency.def()
    }
}

impl Related<super::criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Criteria.def()
    }
}

impl Related<super::performance_level::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PerformanceLevel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
