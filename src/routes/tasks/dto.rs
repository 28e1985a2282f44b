use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub task_id: i32,
    pub teacher_id: i32,
    pub task_name: String,
    pub task_description: String,
    pub due_date: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskDetailResponse {
    pub task: TaskResponse,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[schema(example = "Solar Model")]
    pub task_name: String,

    #[schema(example = "Build a working model of the solar system")]
    pub task_description: String,

    #[schema(example = "2026-08-13")]
    pub due_date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskResponse {
    pub message: String,
    pub task_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub task_name: String,
    pub task_description: String,
    pub due_date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskMessageResponse {
    pub message: String,
}
