use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path},
    http::StatusCode,
    routing::{get, patch},
};

use super::dto::{
    AttachmentResponse, CreateProjectResponse, ProjectAssessmentEntry, ProjectDetail,
    ProjectDetailResponse, ProjectFeedbackEntry, ProjectListResponse, ProjectResponse,
    UpdateStatusRequest, UpdateStatusResponse,
};
use crate::config::{APP_CONFIG, MAX_UPLOAD_BYTES, MAX_UPLOAD_FILES};
use crate::entities::project_attachment;
use crate::entities::sea_orm_active_enums::{ProjectStatus, RoleEnum};
use crate::error::ApiError;
use crate::extractor::AuthClaims;
use crate::policy;
use crate::repositories::project_repository::NewAttachment;
use crate::repositories::{
    AssessmentRepository, CompetencyRepository, FeedbackRepository, ProjectRepository,
    TaskRepository, UserRepository,
};
use crate::utils::upload::{is_allowed_file_type, remove_stored_files, store_attachment};

pub fn create_route() -> Router {
    Router::new()
        .route("/api/projects", get(get_projects).post(create_project))
        .route("/api/projects/{project_id}", get(get_project))
        .route("/api/projects/{project_id}/status", patch(update_status))
        // Five attachments at 10 MiB each, plus form-field headroom.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_FILES * MAX_UPLOAD_BYTES + 64 * 1024))
}

/// Status may only move forward along the submission lifecycle.
fn can_transition(from: ProjectStatus, to: ProjectStatus) -> bool {
    to.rank() >= from.rank()
}

fn attachment_response(a: project_attachment::Model) -> AttachmentResponse {
    AttachmentResponse {
        attachment_id: a.attachment_id,
        file_name: a.file_name,
        file_path: a.file_path,
        file_type: a.file_type,
        uploaded_at: a.uploaded_at.to_string(),
    }
}

/// Role-filtered project listing, newest submissions first, each with its
/// attachments.
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "Projects retrieved", body = ProjectListResponse),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn get_projects(
    AuthClaims(caller): AuthClaims,
) -> Result<Json<ProjectListResponse>, ApiError> {
    let project_repo = ProjectRepository::new();
    let task_repo = TaskRepository::new();
    let user_repo = UserRepository::new();

    let projects = project_repo.list_for_caller(&caller).await?;

    let tasks = task_repo
        .find_by_ids(projects.iter().map(|p| p.task_id).collect())
        .await?;
    let task_names: HashMap<i32, String> = tasks
        .into_iter()
        .map(|t| (t.task_id, t.task_name))
        .collect();

    let students = user_repo
        .find_students_by_ids(projects.iter().map(|p| p.student_id).collect())
        .await?;
    let users = user_repo
        .find_by_ids(students.iter().map(|s| s.user_id).collect())
        .await?;
    let user_names: HashMap<i32, String> = users
        .into_iter()
        .map(|u| (u.user_id, u.display_name()))
        .collect();
    let student_names: HashMap<i32, String> = students
        .into_iter()
        .filter_map(|s| {
            user_names
                .get(&s.user_id)
                .map(|name| (s.student_id, name.clone()))
        })
        .collect();

    let attachments = project_repo
        .attachments_for_projects(projects.iter().map(|p| p.project_id).collect())
        .await?;
    let mut attachments_by_project: HashMap<i32, Vec<AttachmentResponse>> = HashMap::new();
    for attachment in attachments {
        attachments_by_project
            .entry(attachment.project_id)
            .or_default()
            .push(attachment_response(attachment));
    }

    let projects = projects
        .into_iter()
        .map(|p| ProjectResponse {
            task_name: task_names.get(&p.task_id).cloned(),
            student_name: student_names.get(&p.student_id).cloned(),
            attachments: attachments_by_project
                .remove(&p.project_id)
                .unwrap_or_default(),
            project_id: p.project_id,
            student_id: p.student_id,
            task_id: p.task_id,
            project_title: p.project_title,
            project_description: p.project_description,
            status: p.status.as_str().to_string(),
            submission_date: p.submission_date.to_string(),
        })
        .collect();

    Ok(Json(ProjectListResponse { projects }))
}

/// Single fetch through the access gate. Absence and denial are deliberately
/// indistinguishable here.
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}",
    params(("project_id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project retrieved", body = ProjectDetailResponse),
        (status = 404, description = "Project not found or access denied"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn get_project(
    AuthClaims(caller): AuthClaims,
    Path(project_id): Path<i32>,
) -> Result<Json<ProjectDetailResponse>, ApiError> {
    let found = policy::accessible_project(&caller, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found or access denied".to_string()))?;

    let project_repo = ProjectRepository::new();
    let task_repo = TaskRepository::new();
    let user_repo = UserRepository::new();

    let task = task_repo
        .find_by_id(found.task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let (student, student_user) = user_repo
        .find_student_with_user(found.student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;
    let student_name = student_user.map(|u| u.display_name()).unwrap_or_default();

    let attachments = project_repo
        .attachments_for_project(found.project_id)
        .await?
        .into_iter()
        .map(attachment_response)
        .collect();

    let feedback = load_feedback(found.project_id).await?;

    // Assessments stay hidden from students until the project is assessed,
    // and from parents entirely.
    let show_assessments = matches!(caller.role, RoleEnum::Teacher | RoleEnum::Admin)
        || (caller.role == RoleEnum::Student && found.status == ProjectStatus::Assessed);
    let assessments = if show_assessments {
        Some(load_assessments(found.project_id).await?)
    } else {
        None
    };

    Ok(Json(ProjectDetailResponse {
        project: ProjectDetail {
            project_id: found.project_id,
            student_id: found.student_id,
            task_id: found.task_id,
            project_title: found.project_title,
            project_description: found.project_description,
            status: found.status.as_str().to_string(),
            submission_date: found.submission_date.to_string(),
            task_name: task.task_name,
            task_description: task.task_description,
            due_date: task.due_date.to_string(),
            student_name,
            grade: student.grade,
            attachments,
            feedback,
            assessments,
        },
    }))
}

async fn load_feedback(project_id: i32) -> Result<Vec<ProjectFeedbackEntry>, ApiError> {
    let feedback_repo = FeedbackRepository::new();
    let user_repo = UserRepository::new();

    let rows = feedback_repo.list_for_project(project_id).await?;
    let users = user_repo
        .find_by_ids(rows.iter().map(|f| f.user_id).collect())
        .await?;
    let users: HashMap<i32, _> = users.into_iter().map(|u| (u.user_id, u)).collect();

    Ok(rows
        .into_iter()
        .map(|f| {
            let author = users.get(&f.user_id);
            ProjectFeedbackEntry {
                feedback_id: f.feedback_id,
                user_id: f.user_id,
                user_name: author.map(|u| u.display_name()).unwrap_or_default(),
                user_role: author
                    .map(|u| u.role.as_str().to_string())
                    .unwrap_or_default(),
                feedback_text: f.feedback_text,
                feedback_date: f.feedback_date.to_string(),
            }
        })
        .collect())
}

async fn load_assessments(project_id: i32) -> Result<Vec<ProjectAssessmentEntry>, ApiError> {
    let assessment_repo = AssessmentRepository::new();
    let competency_repo = CompetencyRepository::new();

    let rows = assessment_repo.list_for_project(project_id).await?;

    let competencies: HashMap<i32, String> = competency_repo
        .list_all()
        .await?
        .into_iter()
        .map(|c| (c.competency_id, c.competency_name))
        .collect();
    let criteria: HashMap<i32, String> = competency_repo
        .list_criteria()
        .await?
        .into_iter()
        .map(|c| (c.criteria_id, c.criteria_name))
        .collect();
    let levels: HashMap<i32, (String, i32)> = competency_repo
        .list_performance_levels()
        .await?
        .into_iter()
        .map(|l| (l.performance_level_id, (l.level_name, l.score_value)))
        .collect();

    Ok(rows
        .into_iter()
        .map(|a| {
            let (level_name, score_value) = levels
                .get(&a.performance_level_id)
                .cloned()
                .unwrap_or_default();
            ProjectAssessmentEntry {
                assessment_id: a.assessment_id,
                competency_id: a.competency_id,
                competency_name: competencies
                    .get(&a.competency_id)
                    .cloned()
                    .unwrap_or_default(),
                criteria_id: a.criteria_id,
                criteria_name: criteria.get(&a.criteria_id).cloned().unwrap_or_default(),
                performance_level_id: a.performance_level_id,
                level_name,
                score_value,
                comments: a.comments,
                assessment_date: a.assessment_date.to_string(),
            }
        })
        .collect())
}

/// Multipart project submission: text fields plus up to five attachments.
/// Files are written to disk first; the project and attachment rows then land
/// in one transaction, and the files are removed again if it fails.
#[utoipa::path(
    post,
    path = "/api/projects",
    responses(
        (status = 201, description = "Project submitted", body = CreateProjectResponse),
        (status = 400, description = "Missing fields or invalid file"),
        (status = 403, description = "Students only"),
        (status = 404, description = "Student record or task not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn create_project(
    AuthClaims(caller): AuthClaims,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CreateProjectResponse>), ApiError> {
    if caller.role != RoleEnum::Student {
        return Err(ApiError::Forbidden(
            "Access denied. Insufficient permissions.".to_string(),
        ));
    }

    let mut title = String::new();
    let mut description = String::new();
    let mut task_id: Option<i32> = None;
    let mut files: Vec<(String, String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(format!("Failed to read multipart field: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "title" => {
                title = field
                    .text()
                    .await
                    .map_err(|e| ApiError::InvalidInput(format!("Failed to read title: {e}")))?;
            }
            "description" => {
                description = field.text().await.map_err(|e| {
                    ApiError::InvalidInput(format!("Failed to read description: {e}"))
                })?;
            }
            "taskId" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| ApiError::InvalidInput(format!("Failed to read taskId: {e}")))?;
                task_id = Some(
                    raw.parse()
                        .map_err(|_| ApiError::InvalidInput("Invalid taskId".to_string()))?,
                );
            }
            "files" => {
                if files.len() >= MAX_UPLOAD_FILES {
                    return Err(ApiError::InvalidInput(format!(
                        "At most {MAX_UPLOAD_FILES} files are allowed"
                    )));
                }

                let file_name = field.file_name().unwrap_or("attachment").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();

                if !is_allowed_file_type(&content_type) {
                    return Err(ApiError::InvalidInput(
                        "Invalid file type. Only images, PDFs, and Office documents are allowed."
                            .to_string(),
                    ));
                }

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::InvalidInput(format!("Failed to read file: {e}")))?;

                if data.len() > MAX_UPLOAD_BYTES {
                    return Err(ApiError::InvalidInput(
                        "File exceeds the 10MB size limit".to_string(),
                    ));
                }

                files.push((file_name, content_type, data.to_vec()));
            }
            _ => {}
        }
    }

    if title.trim().is_empty() || description.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "Missing required fields".to_string(),
        ));
    }
    let task_id =
        task_id.ok_or_else(|| ApiError::InvalidInput("Missing required fields".to_string()))?;

    let user_repo = UserRepository::new();
    let student = user_repo
        .find_student_by_user_id(caller.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student record not found".to_string()))?;

    let task_repo = TaskRepository::new();
    task_repo
        .find_by_id(task_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let mut stored_paths = Vec::new();
    let mut attachments = Vec::new();
    for (file_name, content_type, data) in &files {
        let stored = store_attachment(&APP_CONFIG.upload_dir, file_name, data).await?;
        stored_paths.push(stored.clone());
        attachments.push(NewAttachment {
            file_name: file_name.clone(),
            file_path: stored,
            file_type: content_type.clone(),
        });
    }

    let project_repo = ProjectRepository::new();
    let created = match project_repo
        .create_with_attachments(student.student_id, task_id, title, description, attachments)
        .await
    {
        Ok(created) => created,
        Err(e) => {
            remove_stored_files(&stored_paths).await;
            return Err(ApiError::StorageFailure(e));
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(CreateProjectResponse {
            message: "Project submitted successfully".to_string(),
            project_id: created.project_id,
        }),
    ))
}

/// Status transition. The acting teacher is not checked against the task
/// owner on this path; see DESIGN.md.
#[utoipa::path(
    patch,
    path = "/api/projects/{project_id}/status",
    params(("project_id" = i32, Path, description = "Project id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = UpdateStatusResponse),
        (status = 400, description = "Invalid status or backward transition"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn update_status(
    AuthClaims(caller): AuthClaims,
    Path(project_id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<UpdateStatusResponse>, ApiError> {
    if caller.role != RoleEnum::Teacher && caller.role != RoleEnum::Admin {
        return Err(ApiError::Forbidden(
            "Access denied. Insufficient permissions.".to_string(),
        ));
    }

    let new_status = ProjectStatus::parse(&payload.status)
        .ok_or_else(|| ApiError::InvalidInput("Invalid status".to_string()))?;

    let project_repo = ProjectRepository::new();
    let found = project_repo
        .find_by_id(project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    if !can_transition(found.status, new_status) {
        return Err(ApiError::InvalidInput("Invalid status".to_string()));
    }

    project_repo.update_status(project_id, new_status).await?;

    Ok(Json(UpdateStatusResponse {
        message: "Project status updated successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequest;

    use crate::policy::Caller;

    fn caller(role: RoleEnum) -> Caller {
        Caller {
            user_id: 1,
            role,
            email: "caller@school.edu".to_string(),
            name: "Test Caller".to_string(),
        }
    }

    #[test]
    fn transitions_never_move_backwards() {
        use ProjectStatus::*;

        assert!(can_transition(Submitted, UnderReview));
        assert!(can_transition(Submitted, Assessed));
        assert!(can_transition(UnderReview, Assessed));
        assert!(can_transition(Assessed, Returned));
        assert!(can_transition(Assessed, Assessed));

        assert!(!can_transition(Returned, Assessed));
        assert!(!can_transition(Assessed, Submitted));
        assert!(!can_transition(UnderReview, Submitted));
    }

    #[tokio::test]
    async fn students_cannot_change_project_status() {
        let result = update_status(
            AuthClaims(caller(RoleEnum::Student)),
            Path(1),
            Json(UpdateStatusRequest {
                status: "Assessed".to_string(),
            }),
        )
        .await;

        match result {
            Err(ApiError::Forbidden(_)) => {}
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_status_values_are_rejected_before_any_lookup() {
        let result = update_status(
            AuthClaims(caller(RoleEnum::Teacher)),
            Path(1),
            Json(UpdateStatusRequest {
                status: "Archived".to_string(),
            }),
        )
        .await;

        match result {
            Err(ApiError::InvalidInput(msg)) => assert_eq!(msg, "Invalid status"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn parents_cannot_submit_projects() {
        // Role gate fires before the multipart body is touched, so an empty
        // body is fine here.
        let result = create_project(
            AuthClaims(caller(RoleEnum::Parent)),
            Multipart::from_request(
                axum::http::Request::builder()
                    .header("content-type", "multipart/form-data; boundary=x")
                    .body(axum::body::Body::empty())
                    .unwrap(),
                &(),
            )
            .await
            .unwrap(),
        )
        .await;

        match result {
            Err(ApiError::Forbidden(_)) => {}
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }
}
