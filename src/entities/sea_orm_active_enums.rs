//! Active enums shared across entities

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum RoleEnum {
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "teacher")]
    Teacher,
    #[sea_orm(string_value = "parent")]
    Parent,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl RoleEnum {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleEnum::Student => "student",
            RoleEnum::Teacher => "teacher",
            RoleEnum::Parent => "parent",
            RoleEnum::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(RoleEnum::Student),
            "teacher" => Some(RoleEnum::Teacher),
            "parent" => Some(RoleEnum::Parent),
            "admin" => Some(RoleEnum::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ProjectStatus {
    #[sea_orm(string_value = "Submitted")]
    #[serde(rename = "Submitted")]
    Submitted,
    #[sea_orm(string_value = "Under Review")]
    #[serde(rename = "Under Review")]
    UnderReview,
    #[sea_orm(string_value = "Assessed")]
    #[serde(rename = "Assessed")]
    Assessed,
    #[sea_orm(string_value = "Returned")]
    #[serde(rename = "Returned")]
    Returned,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Submitted => "Submitted",
            ProjectStatus::UnderReview => "Under Review",
            ProjectStatus::Assessed => "Assessed",
            ProjectStatus::Returned => "Returned",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Submitted" => Some(ProjectStatus::Submitted),
            "Under Review" => Some(ProjectStatus::UnderReview),
            "Assessed" => Some(ProjectStatus::Assessed),
            "Returned" => Some(ProjectStatus::Returned),
            _ => None,
        }
    }

    /// Position in the Submitted -> Under Review -> Assessed -> Returned progression.
    pub fn rank(&self) -> u8 {
        match self {
            ProjectStatus::Submitted => 0,
            ProjectStatus::UnderReview => 1,
            ProjectStatus::Assessed => 2,
            ProjectStatus::Returned => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        for role in [
            RoleEnum::Student,
            RoleEnum::Teacher,
            RoleEnum::Parent,
            RoleEnum::Admin,
        ] {
            assert_eq!(RoleEnum::parse(role.as_str()), Some(role));
        }
        assert_eq!(RoleEnum::parse("principal"), None);
    }

    #[test]
    fn status_progression_is_ordered() {
        assert!(ProjectStatus::Submitted.rank() < ProjectStatus::UnderReview.rank());
        assert!(ProjectStatus::UnderReview.rank() < ProjectStatus::Assessed.rank());
        assert!(ProjectStatus::Assessed.rank() < ProjectStatus::Returned.rank());
    }

    #[test]
    fn status_parses_the_wire_spelling() {
        assert_eq!(
            ProjectStatus::parse("Under Review"),
            Some(ProjectStatus::UnderReview)
        );
        assert_eq!(ProjectStatus::parse("under review"), None);
    }
}
