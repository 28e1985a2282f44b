use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyResponse {
    pub competency_id: i32,
    pub competency_name: String,
    pub competency_description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompetencyListResponse {
    pub competencies: Vec<CompetencyResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaResponse {
    pub criteria_id: i32,
    pub competency_id: i32,
    pub competency_name: String,
    pub criteria_name: String,
    pub criteria_description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CriteriaListResponse {
    pub criteria: Vec<CriteriaResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceLevelResponse {
    pub performance_level_id: i32,
    pub level_name: String,
    pub score_value: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PerformanceLevelListResponse {
    pub levels: Vec<PerformanceLevelResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompetencyRequest {
    #[schema(example = "Communication")]
    pub competency_name: String,

    pub competency_description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompetencyResponse {
    pub message: String,
    pub competency_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStudent {
    pub student_id: i32,
    pub student_name: String,
    pub grade: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyProgressResponse {
    pub competency_id: i32,
    pub competency_name: String,
    pub average_score: Option<f64>,
    pub percentage_score: i64,
    pub project_count: u64,
    pub max_score_observed: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProgressResponse {
    pub student: ProgressStudent,
    pub progress: Vec<CompetencyProgressResponse>,
}
