use std::collections::HashMap;

use axum::{Json, Router, extract::Path, http::StatusCode, routing::get};

use super::dto::{
    CreateFeedbackRequest, CreateFeedbackResponse, FeedbackListResponse, FeedbackResponse,
};
use crate::error::ApiError;
use crate::extractor::AuthClaims;
use crate::policy;
use crate::repositories::{FeedbackRepository, UserRepository};

pub fn create_route() -> Router {
    Router::new().route(
        "/api/feedback/project/{project_id}",
        get(get_project_feedback).post(create_feedback),
    )
}

/// Feedback is visible to anyone who can see the project.
#[utoipa::path(
    get,
    path = "/api/feedback/project/{project_id}",
    params(("project_id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Feedback retrieved", body = FeedbackListResponse),
        (status = 403, description = "Access denied or project not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
pub async fn get_project_feedback(
    AuthClaims(caller): AuthClaims,
    Path(project_id): Path<i32>,
) -> Result<Json<FeedbackListResponse>, ApiError> {
    policy::accessible_project(&caller, project_id)
        .await?
        .ok_or_else(|| ApiError::Forbidden("Access denied or project not found".to_string()))?;

    let feedback_repo = FeedbackRepository::new();
    let user_repo = UserRepository::new();

    let rows = feedback_repo.list_for_project(project_id).await?;
    let users = user_repo
        .find_by_ids(rows.iter().map(|f| f.user_id).collect())
        .await?;
    let users: HashMap<i32, _> = users.into_iter().map(|u| (u.user_id, u)).collect();

    let feedback = rows
        .into_iter()
        .map(|f| {
            let author = users.get(&f.user_id);
            FeedbackResponse {
                feedback_id: f.feedback_id,
                project_id: f.project_id,
                user_id: f.user_id,
                user_name: author.map(|u| u.display_name()).unwrap_or_default(),
                user_role: author
                    .map(|u| u.role.as_str().to_string())
                    .unwrap_or_default(),
                feedback_text: f.feedback_text,
                feedback_date: f.feedback_date.to_string(),
            }
        })
        .collect();

    Ok(Json(FeedbackListResponse { feedback }))
}

/// Unlike assessments, feedback is writable by every role with project
/// access; parents and students comment too.
#[utoipa::path(
    post,
    path = "/api/feedback/project/{project_id}",
    params(("project_id" = i32, Path, description = "Project id")),
    request_body = CreateFeedbackRequest,
    responses(
        (status = 201, description = "Feedback added", body = CreateFeedbackResponse),
        (status = 400, description = "Feedback text is required"),
        (status = 403, description = "Access denied or project not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Feedback"
)]
pub async fn create_feedback(
    AuthClaims(caller): AuthClaims,
    Path(project_id): Path<i32>,
    Json(payload): Json<CreateFeedbackRequest>,
) -> Result<(StatusCode, Json<CreateFeedbackResponse>), ApiError> {
    if payload.feedback_text.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "Feedback text is required".to_string(),
        ));
    }

    policy::accessible_project(&caller, project_id)
        .await?
        .ok_or_else(|| ApiError::Forbidden("Access denied or project not found".to_string()))?;

    let feedback_repo = FeedbackRepository::new();
    feedback_repo
        .create(project_id, caller.user_id, payload.feedback_text)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateFeedbackResponse {
            message: "Feedback added successfully".to_string(),
        }),
    ))
}
