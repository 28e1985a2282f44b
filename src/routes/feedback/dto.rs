use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub feedback_id: i32,
    pub project_id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub user_role: String,
    pub feedback_text: String,
    pub feedback_date: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackListResponse {
    pub feedback: Vec<FeedbackResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    #[schema(example = "Strong analysis, but cite your sources.")]
    pub feedback_text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateFeedbackResponse {
    pub message: String,
}
