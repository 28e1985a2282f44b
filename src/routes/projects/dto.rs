use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentResponse {
    pub attachment_id: i32,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub uploaded_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub project_id: i32,
    pub student_id: i32,
    pub task_id: i32,
    pub project_title: String,
    pub project_description: String,
    pub status: String,
    pub submission_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    pub attachments: Vec<AttachmentResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFeedbackEntry {
    pub feedback_id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub user_role: String,
    pub feedback_text: String,
    pub feedback_date: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAssessmentEntry {
    pub assessment_id: i32,
    pub competency_id: i32,
    pub competency_name: String,
    pub criteria_id: i32,
    pub criteria_name: String,
    pub performance_level_id: i32,
    pub level_name: String,
    pub score_value: i32,
    pub comments: Option<String>,
    pub assessment_date: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    pub project_id: i32,
    pub student_id: i32,
    pub task_id: i32,
    pub project_title: String,
    pub project_description: String,
    pub status: String,
    pub submission_date: String,
    pub task_name: String,
    pub task_description: String,
    pub due_date: String,
    pub student_name: String,
    pub grade: Option<String>,
    pub attachments: Vec<AttachmentResponse>,
    pub feedback: Vec<ProjectFeedbackEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessments: Option<Vec<ProjectAssessmentEntry>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectDetailResponse {
    pub project: ProjectDetail,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectResponse {
    pub message: String,
    pub project_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    #[schema(example = "Under Review")]
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateStatusResponse {
    pub message: String,
}
