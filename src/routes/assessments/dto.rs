use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentItemRequest {
    pub competency_id: i32,
    pub criteria_id: i32,
    pub performance_level_id: i32,
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssessmentRequest {
    pub assessments: Option<Vec<AssessmentItemRequest>>,
    pub feedback: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitAssessmentResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    pub assessment_id: i32,
    pub project_id: i32,
    pub competency_id: i32,
    pub competency_name: String,
    pub criteria_id: i32,
    pub criteria_name: String,
    pub performance_level_id: i32,
    pub level_name: String,
    pub score_value: i32,
    pub comments: Option<String>,
    pub assessment_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssessmentListResponse {
    pub assessments: Vec<AssessmentResponse>,
}
