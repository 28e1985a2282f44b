use std::collections::{HashMap, HashSet};

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{assessment, competency, criteria, performance_level};
use crate::static_service::DATABASE_CONNECTION;

/// Aggregated standing of one competency for one student. Competencies with
/// no assessment rows still appear, at zero percent.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetencyProgress {
    pub competency_id: i32,
    pub competency_name: String,
    pub average_score: Option<f64>,
    pub percentage_score: i64,
    pub project_count: u64,
    pub max_score_observed: Option<i32>,
}

pub struct CompetencyRepository;

impl CompetencyRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn list_all(&self) -> Result<Vec<competency::Model>> {
        let db = self.get_connection();
        let competencies = competency::Entity::find()
            .order_by_asc(competency::Column::CompetencyName)
            .all(db)
            .await?;
        Ok(competencies)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<competency::Model>> {
        let db = self.get_connection();
        let found = competency::Entity::find()
            .filter(competency::Column::CompetencyName.eq(name))
            .one(db)
            .await?;
        Ok(found)
    }

    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<competency::Model> {
        let db = self.get_connection();
        let created = competency::ActiveModel {
            competency_name: Set(name),
            competency_description: Set(description),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(created)
    }

    pub async fn list_criteria(&self) -> Result<Vec<criteria::Model>> {
        let db = self.get_connection();
        let rows = criteria::Entity::find()
            .order_by_asc(criteria::Column::CompetencyId)
            .order_by_asc(criteria::Column::CriteriaName)
            .all(db)
            .await?;
        Ok(rows)
    }

    pub async fn find_criteria_by_ids(
        &self,
        criteria_ids: Vec<i32>,
    ) -> Result<HashMap<i32, criteria::Model>> {
        if criteria_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let db = self.get_connection();
        let rows = criteria::Entity::find()
            .filter(criteria::Column::CriteriaId.is_in(criteria_ids))
            .all(db)
            .await?;
        Ok(rows.into_iter().map(|c| (c.criteria_id, c)).collect())
    }

    /// The full ordinal scale, lowest score first. Also the single source for
    /// the dynamic maximum-score lookup used by progress aggregation.
    pub async fn list_performance_levels(&self) -> Result<Vec<performance_level::Model>> {
        let db = self.get_connection();
        let levels = performance_level::Entity::find()
            .order_by_asc(performance_level::Column::ScoreValue)
            .all(db)
            .await?;
        Ok(levels)
    }
}

/// Folds raw assessment rows into per-competency progress over the whole
/// catalog. `max_possible` is the catalog-wide maximum score value, looked up
/// once per call; it is invariant across the loop.
pub fn compute_progress(
    competencies: &[competency::Model],
    assessments: &[assessment::Model],
    score_by_level: &HashMap<i32, i32>,
    max_possible: Option<i32>,
) -> Vec<CompetencyProgress> {
    competencies
        .iter()
        .map(|comp| {
            let mut scores: Vec<i32> = Vec::new();
            let mut projects: HashSet<i32> = HashSet::new();

            for row in assessments
                .iter()
                .filter(|a| a.competency_id == comp.competency_id)
            {
                if let Some(score) = score_by_level.get(&row.performance_level_id) {
                    scores.push(*score);
                    projects.insert(row.project_id);
                }
            }

            let average_score = if scores.is_empty() {
                None
            } else {
                Some(scores.iter().sum::<i32>() as f64 / scores.len() as f64)
            };

            let percentage_score = match (average_score, max_possible) {
                (Some(avg), Some(max)) if max > 0 => (avg / max as f64 * 100.0).round() as i64,
                _ => 0,
            };

            CompetencyProgress {
                competency_id: comp.competency_id,
                competency_name: comp.competency_name.clone(),
                average_score,
                percentage_score,
                project_count: projects.len() as u64,
                max_score_observed: scores.iter().max().copied(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn competency(id: i32, name: &str) -> competency::Model {
        competency::Model {
            competency_id: id,
            competency_name: name.to_string(),
            competency_description: None,
        }
    }

    fn assessment_row(competency_id: i32, project_id: i32, level_id: i32) -> assessment::Model {
        assessment::Model {
            assessment_id: 0,
            project_id,
            teacher_id: 1,
            competency_id,
            criteria_id: 1,
            performance_level_id: level_id,
            comments: None,
            assessment_date: NaiveDateTime::default(),
        }
    }

    fn four_level_scale() -> HashMap<i32, i32> {
        HashMap::from([(1, 1), (2, 2), (3, 3), (4, 4)])
    }

    #[test]
    fn unassessed_competencies_appear_at_zero_percent() {
        let catalog = vec![
            competency(1, "Collaboration"),
            competency(2, "Communication"),
        ];
        let assessments = vec![assessment_row(2, 10, 3)];

        let progress = compute_progress(&catalog, &assessments, &four_level_scale(), Some(4));

        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].competency_id, 1);
        assert_eq!(progress[0].average_score, None);
        assert_eq!(progress[0].percentage_score, 0);
        assert_eq!(progress[0].project_count, 0);
        assert_eq!(progress[0].max_score_observed, None);
    }

    #[test]
    fn single_score_of_three_on_a_four_scale_is_75_percent() {
        let catalog = vec![competency(1, "Communication")];
        let assessments = vec![assessment_row(1, 10, 3)];

        let progress = compute_progress(&catalog, &assessments, &four_level_scale(), Some(4));

        assert_eq!(progress[0].average_score, Some(3.0));
        assert_eq!(progress[0].percentage_score, 75);
        assert_eq!(progress[0].max_score_observed, Some(3));
    }

    #[test]
    fn average_and_distinct_project_count_across_rows() {
        let catalog = vec![competency(1, "Critical Thinking")];
        // Two rows on project 10, one on project 11: scores 2, 4, 3.
        let assessments = vec![
            assessment_row(1, 10, 2),
            assessment_row(1, 10, 4),
            assessment_row(1, 11, 3),
        ];

        let progress = compute_progress(&catalog, &assessments, &four_level_scale(), Some(4));

        assert_eq!(progress[0].average_score, Some(3.0));
        assert_eq!(progress[0].percentage_score, 75);
        assert_eq!(progress[0].project_count, 2);
        assert_eq!(progress[0].max_score_observed, Some(4));
    }

    #[test]
    fn max_possible_is_dynamic_not_a_four_point_assumption() {
        let catalog = vec![competency(1, "Creativity")];
        let scale: HashMap<i32, i32> = HashMap::from([(1, 2), (2, 5), (3, 10)]);
        let assessments = vec![assessment_row(1, 10, 2)];

        let progress = compute_progress(&catalog, &assessments, &scale, Some(10));

        assert_eq!(progress[0].average_score, Some(5.0));
        assert_eq!(progress[0].percentage_score, 50);
    }

    #[test]
    fn empty_scale_degrades_to_zero_percent() {
        let catalog = vec![competency(1, "Communication")];
        let progress = compute_progress(&catalog, &[], &HashMap::new(), None);
        assert_eq!(progress[0].percentage_score, 0);
    }

    #[test]
    fn rounding_follows_round_half_away_from_zero() {
        let catalog = vec![competency(1, "Communication")];
        // Scores 1 and 2 on a 4-scale: avg 1.5, 37.5% rounds to 38.
        let assessments = vec![assessment_row(1, 10, 1), assessment_row(1, 10, 2)];

        let progress = compute_progress(&catalog, &assessments, &four_level_scale(), Some(4));

        assert_eq!(progress[0].percentage_score, 38);
    }
}
